use alloy::sol;

sol! {
    event DelegationCreated(address indexed delegator, uint256 indexed slot, uint96 lockUntil, address indexed delegatee, address delegation, address user);
    event DelegationFunded(address indexed delegator, uint256 indexed slot, uint256 amount, address indexed user);
    event DelegateeUpdated(address indexed delegator, uint256 indexed slot, address indexed delegatee, uint96 lockUntil, address user);
    event TransferredDelegation(address indexed delegator, uint256 indexed slot, uint256 amount, address indexed to);
}
