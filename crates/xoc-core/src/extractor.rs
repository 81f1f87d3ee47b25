//! Response extraction over the agent's free-text replies.
//!
//! The agent answers in prose, so balances and transaction hashes are pulled
//! out with tolerant patterns. Every function here is total: a reply that
//! does not match yields a default (zero balance, unchanged text) instead of
//! an error, and callers only ever see typed facts.
//!
//! The phrases matched below are a contract with the wallet tools' output
//! format:
//!
//! - `Native Balance: <eth>` / `ETH Balance: <eth>`
//! - `Transaction: 0x<64 hex>` / `transaction hash: 0x<64 hex>` / `hash: 0x<64 hex>`

use crate::constants::{BASESCAN_TX_URL, ETH_DECIMALS, WEI_PER_ETH};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, warn};

static BALANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Native Balance:|ETH Balance:)\s*(\d+(?:\.\d*)?|\.\d+)")
        .expect("balance pattern is valid")
});

static LABELED_TX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Transaction:|transaction hash:|hash:)\s*\b(0x[a-f0-9]{64})\b")
        .expect("labeled transaction pattern is valid")
});

static TX_HASH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b0x[a-f0-9]{64}\b").expect("transaction hash pattern is valid")
});

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Address:\s*([0-9a-fA-Fx]+)").expect("address pattern is valid")
});

static ETH_BALANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ETH Balance:\s*([\d.]+)").expect("eth balance pattern is valid")
});

static NATIVE_WEI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Native Balance:.*?(\d+)\s*WEI").expect("native balance pattern is valid")
});

static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Successfully\s+(.+?)\.(?:\s|$)").expect("action pattern is valid")
});

/// Extract the wallet balance, in wei, from a balance report.
///
/// The first `Native Balance:` or `ETH Balance:` phrase is read as an ETH
/// amount and converted to wei, truncating digits past the 18th decimal.
/// Returns `0` when no balance phrase is present or the amount does not fit,
/// so an unreadable report always fails the balance gate.
pub fn extract_balance(text: &str) -> u128 {
    let Some(captures) = BALANCE_RE.captures(text) else {
        warn!("[Extractor] Could not find balance in response");
        return 0;
    };

    let amount = &captures[1];
    match parse_ether(amount) {
        Some(wei) => {
            debug!("[Extractor] Extracted balance {} ETH = {} wei", amount, wei);
            wei
        }
        None => {
            warn!("[Extractor] Could not convert balance '{}' to wei", amount);
            0
        }
    }
}

/// Convert a decimal ETH string to wei with exact integer arithmetic.
///
/// Digits beyond 18 decimals are truncated. Returns `None` for anything
/// that is not a plain decimal number or that overflows `u128`.
pub fn parse_ether(amount: &str) -> Option<u128> {
    let amount = amount.trim();
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let whole_wei = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().ok()?.checked_mul(WEI_PER_ETH)?
    };

    let mut fraction_digits: String = fraction.chars().take(ETH_DECIMALS).collect();
    while fraction_digits.len() < ETH_DECIMALS {
        fraction_digits.push('0');
    }
    let fraction_wei = fraction_digits.parse::<u128>().ok()?;

    whole_wei.checked_add(fraction_wei)
}

/// Render a wei amount as ETH without trailing zeros (`200000000000000` → `0.0002`).
pub fn format_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETH;
    let fraction = wei % WEI_PER_ETH;
    if fraction == 0 {
        return whole.to_string();
    }

    let fraction = format!("{fraction:0width$}", width = ETH_DECIMALS);
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

fn basescan_link(hash: &str) -> String {
    format!("Transaction: [View on Basescan]({BASESCAN_TX_URL}{hash})")
}

/// Rewrite the first labeled transaction hash into a Basescan link.
///
/// The whole labeled span (`Transaction: 0x…`, `transaction hash: 0x…` or
/// `hash: 0x…`) becomes a new line holding the link. Later hashes are left
/// verbatim and the result is trimmed. Text without a labeled 64-digit hash
/// comes back unchanged apart from trimming.
pub fn format_transaction_link(text: &str) -> String {
    LABELED_TX_RE
        .replacen(text, 1, |captures: &Captures| {
            format!("\n{}", basescan_link(&captures[1]))
        })
        .trim()
        .to_string()
}

/// Normalize a chat reply for the web client.
///
/// Wallet reports are reduced to a fixed summary block and transaction
/// results to the action line plus an explorer link. Anything else passes
/// through unchanged.
pub fn summarize_chat_reply(text: &str) -> String {
    if text.contains("Wallet Details") {
        let address = ADDRESS_RE
            .captures(text)
            .map(|c| c[1].to_string())
            .unwrap_or_default();
        let eth_balance = ETH_BALANCE_RE
            .captures(text)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| "0".to_string());
        let native_balance = NATIVE_WEI_RE
            .captures(text)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| "0".to_string());

        return [
            "Wallet Details:".to_string(),
            format!("- Address: {address}"),
            "- Network: Base Mainnet".to_string(),
            format!("- ETH Balance: {eth_balance} ETH"),
            format!("- Native Balance: {native_balance} WEI"),
        ]
        .join("\n");
    }

    if let Some(hash) = TX_HASH_RE.find(text) {
        let action = ACTION_RE
            .captures(text)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_else(|| "Transaction completed".to_string());
        return format!("{action}.\n{}", basescan_link(hash.as_str()));
    }

    text.to_string()
}
