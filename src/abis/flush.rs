use alloy::sol;

sol! {
    event Flushed(address indexed destination, uint256 amount);
}
