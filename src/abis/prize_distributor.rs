use alloy::sol;

sol! {
    event ClaimedDraw(address indexed user, uint32 indexed drawId, uint256 payout);
}
