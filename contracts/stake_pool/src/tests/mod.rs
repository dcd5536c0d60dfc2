mod rewards;
mod withdraw;
