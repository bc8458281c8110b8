use alloy::sol;

sol! {
    event Deposited(address indexed operator, address indexed to, address token, uint256 amount);
    event Withdrawal(address indexed operator, address indexed from, address token, uint256 amount, uint256 redeemed);
}
