//! Tests for balance extraction and transaction link formatting

use rstest::rstest;
use xoc_core::{
    extract_balance, format_ether, format_transaction_link, parse_ether, summarize_chat_reply,
};

const HASH: &str = "0x4f1a9c2b7d3e5f60718293a4b5c6d7e8f90123456789abcdef0123456789abcd";

#[rstest]
#[case("Native Balance: 0.0002", 200_000_000_000_000)]
#[case("ETH Balance: 0.0002", 200_000_000_000_000)]
#[case("Wallet Details:\n- ETH Balance: 0.0002 ETH\n", 200_000_000_000_000)]
#[case("eth balance: 1.5", 1_500_000_000_000_000_000)]
#[case("Native Balance:   3", 3_000_000_000_000_000_000)]
#[case("Your Native Balance: 0.0003.", 300_000_000_000_000)]
#[case("ETH Balance: .5", 500_000_000_000_000_000)]
#[case("ETH Balance: 0.0000000000000000019", 1)]
fn test_extract_balance(#[case] reply: &str, #[case] expected: u128) {
    assert_eq!(extract_balance(reply), expected);
}

#[rstest]
#[case("")]
#[case("I could not fetch your wallet right now.")]
#[case("Balance: 0.5 ETH")]
#[case("Native Balance: unknown")]
#[case("ETH Balance: 999999999999999999999999999999999999999")]
fn test_extract_balance_fails_closed(#[case] reply: &str) {
    assert_eq!(extract_balance(reply), 0);
}

#[test]
fn test_extract_balance_uses_first_phrase() {
    let reply = "ETH Balance: 0.0001 ETH\nNative Balance: 0.0009";
    assert_eq!(extract_balance(reply), 100_000_000_000_000);
}

#[test]
fn test_parse_ether_is_exact() {
    assert_eq!(parse_ether("0.1"), Some(100_000_000_000_000_000));
    assert_eq!(
        parse_ether("123.4567890123456789019"),
        Some(123_456_789_012_345_678_901)
    );
    assert_eq!(parse_ether("1."), Some(1_000_000_000_000_000_000));
    assert_eq!(parse_ether("."), None);
    assert_eq!(parse_ether("1.2.3"), None);
    assert_eq!(parse_ether("-1"), None);
}

#[rstest]
#[case(200_000_000_000_000, "0.0002")]
#[case(1_000_000_000_000_000_000, "1")]
#[case(1_500_000_000_000_000_000, "1.5")]
#[case(1, "0.000000000000000001")]
#[case(0, "0")]
fn test_format_ether(#[case] wei: u128, #[case] expected: &str) {
    assert_eq!(format_ether(wei), expected);
}

#[rstest]
#[case(format!("Successfully wrapped 0.0001 ETH to WETH. Transaction: {HASH}"))]
#[case(format!("Supplied WETH. transaction hash: {HASH}"))]
#[case(format!("Minted XOC, hash: {HASH}"))]
#[case(format!("Approved. TRANSACTION HASH:{HASH}"))]
fn test_format_transaction_link(#[case] reply: String) {
    let formatted = format_transaction_link(&reply);
    let link = format!("[View on Basescan](https://basescan.org/tx/{HASH})");

    assert_eq!(formatted.matches(&link).count(), 1);
    assert!(formatted.contains(&format!("\nTransaction: {link}")));
    assert!(!formatted.to_lowercase().contains("hash:"));
    assert_eq!(formatted.matches(HASH).count(), 1);
}

#[test]
fn test_format_transaction_link_replaces_whole_labeled_span() {
    let reply = format!("Successfully borrowed 0.05 XOC.\nTransaction: {HASH}\n");
    assert_eq!(
        format_transaction_link(&reply),
        format!(
            "Successfully borrowed 0.05 XOC.\n\nTransaction: [View on Basescan](https://basescan.org/tx/{HASH})"
        )
    );
}

#[test]
fn test_format_transaction_link_label_first_is_trimmed() {
    let reply = format!("Transaction: {HASH}");
    assert_eq!(
        format_transaction_link(&reply),
        format!("Transaction: [View on Basescan](https://basescan.org/tx/{HASH})")
    );
}

#[test]
fn test_format_transaction_link_rewrites_only_first_hash() {
    let second = format!("0x{}", "b".repeat(64));
    let reply = format!("Approve hash: {HASH}\nSupply hash: {second}\nRaw: {second}");

    let formatted = format_transaction_link(&reply);

    assert_eq!(formatted.matches("[View on Basescan]").count(), 1);
    assert!(formatted.contains(&format!("Supply hash: {second}")));
    assert!(formatted.ends_with(&format!("Raw: {second}")));
}

#[rstest]
#[case("  Successfully approved 0.05 XOC.  ", "Successfully approved 0.05 XOC.")]
#[case("Transaction: 0xabc123", "Transaction: 0xabc123")]
#[case(
    "hash: 0x4f1a9c2b7d3e5f60718293a4b5c6d7e8f90123456789abcdef0123456789abcd0",
    "hash: 0x4f1a9c2b7d3e5f60718293a4b5c6d7e8f90123456789abcdef0123456789abcd0"
)]
#[case(
    "Supplied. 0x4f1a9c2b7d3e5f60718293a4b5c6d7e8f90123456789abcdef0123456789abcd",
    "Supplied. 0x4f1a9c2b7d3e5f60718293a4b5c6d7e8f90123456789abcdef0123456789abcd"
)]
fn test_format_transaction_link_passes_through(#[case] reply: &str, #[case] expected: &str) {
    assert_eq!(format_transaction_link(reply), expected);
}

#[test]
fn test_summarize_wallet_details() {
    let reply = "Wallet Details:\n- Provider: viem\n- Address: 0x8Fe1A2C5E7d4b3a96F0c2D1e4B7a5C3d9E8f6A21\n- ETH Balance: 0.0003\n- Native Balance: 300000000000000 WEI";

    assert_eq!(
        summarize_chat_reply(reply),
        "Wallet Details:\n- Address: 0x8Fe1A2C5E7d4b3a96F0c2D1e4B7a5C3d9E8f6A21\n- Network: Base Mainnet\n- ETH Balance: 0.0003 ETH\n- Native Balance: 300000000000000 WEI"
    );
}

#[test]
fn test_summarize_wallet_details_defaults() {
    assert_eq!(
        summarize_chat_reply("Wallet Details: unavailable"),
        "Wallet Details:\n- Address: \n- Network: Base Mainnet\n- ETH Balance: 0 ETH\n- Native Balance: 0 WEI"
    );
}

#[test]
fn test_summarize_transaction_reply() {
    let reply = format!("Successfully supplied 0.0001 WETH to Alux. Transaction hash: {HASH}");
    assert_eq!(
        summarize_chat_reply(&reply),
        format!(
            "supplied 0.0001 WETH to Alux.\nTransaction: [View on Basescan](https://basescan.org/tx/{HASH})"
        )
    );

    let bare = format!("Done: {HASH}");
    assert_eq!(
        summarize_chat_reply(&bare),
        format!(
            "Transaction completed.\nTransaction: [View on Basescan](https://basescan.org/tx/{HASH})"
        )
    );
}

#[test]
fn test_summarize_passes_other_replies_through() {
    let reply = "Alux is a lending protocol on Base. Contract 0x7a8AE9bB9080670e2BAFb6Df3EA62968F4Ad8a88";
    assert_eq!(summarize_chat_reply(reply), reply);
}
