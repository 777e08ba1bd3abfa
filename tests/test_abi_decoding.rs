// ABI decoding of position reads, receipts and JSON-RPC bodies
// Run with: cargo test --test test_abi_decoding

use ethers::types::U256;
use tickscope::abi::events::{DECREASE_LIQUIDITY_SIGNATURE, INCREASE_LIQUIDITY_SIGNATURE};
use tickscope::abi::*;
use tickscope::rpc::{
    eth_call_request, parse_call_result, parse_receipt, transaction_receipt_request,
};

const WETH: &str = "c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";
const USDC: &str = "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";

fn address_word(address: &str) -> String {
    format!("{}{address}", "0".repeat(24))
}

fn position_blob() -> String {
    [
        encode_word(U256::from(7u64)),
        encode_word(U256::zero()),
        address_word(WETH),
        address_word(USDC),
        encode_word(U256::from(3_000u64)),
        format!("{}f2764c", "f".repeat(58)),
        format!("{}0d89b4", "0".repeat(58)),
        encode_word(U256::exp10(18)),
        encode_word(U256::zero()),
        encode_word(U256::zero()),
        encode_word(U256::from(5u64)),
        encode_word(U256::from(9u64)),
    ]
    .concat()
}

#[test]
fn test_decode_full_position() {
    let blob = position_blob();
    assert_eq!(blob.len(), POSITION_HEX_LEN);

    let position = decode_position(&format!("0x{blob}")).unwrap();
    assert_eq!(position.nonce, U256::from(7u64));
    assert_eq!(position.operator, format!("0x{}", "0".repeat(40)));
    assert_eq!(position.token0, format!("0x{WETH}"));
    assert_eq!(position.token1, format!("0x{USDC}"));
    assert_eq!(position.fee, 3_000);
    assert_eq!(position.tick_lower, -887_220);
    assert_eq!(position.tick_upper, 887_220);
    assert_eq!(position.liquidity, U256::exp10(18));
    assert_eq!(position.tokens_owed0, U256::from(5u64));
    assert_eq!(position.tokens_owed1, U256::from(9u64));
}

#[test]
fn test_decode_position_without_prefix() {
    let position = decode_position(&position_blob()).unwrap();
    assert_eq!(position.fee, 3_000);
}

#[test]
fn test_decode_position_rejects_bad_blobs() {
    let blob = position_blob();
    assert!(decode_position(&blob[..blob.len() - 2]).is_err());

    let mut corrupted = blob.clone();
    corrupted.replace_range(0..2, "zz");
    assert!(decode_position(&corrupted).is_err());
}

#[test]
fn test_positions_call_encoding() {
    let data = positions_call(U256::from(12_345u64));
    assert!(data.starts_with("0x99fbab88"));
    assert_eq!(data.len(), 2 + 8 + WORD_HEX_LEN);
    assert!(data.ends_with("3039"));
}

#[test]
fn test_primitive_decoders() {
    assert_eq!(decode_uint("0xbb8").unwrap(), U256::from(3_000u64));
    assert_eq!(decode_uint(&"f".repeat(64)).unwrap(), U256::MAX);
    assert_eq!(decode_int24("f2764c").unwrap(), -887_220);
    assert_eq!(decode_int24("0x0d89b4").unwrap(), 887_220);
    assert_eq!(decode_int24("3c").unwrap(), 60);
    assert_eq!(
        decode_address(&format!("0x{}", address_word(USDC))).unwrap(),
        format!("0x{USDC}")
    );
}

// ============================================================
// RECEIPTS
// ============================================================

fn increase_liquidity_log(token_id: u64) -> LogEntry {
    LogEntry {
        address: "0xc36442b4a4522e871399cd717abdd847ab11fe88".to_string(),
        topics: vec![
            event_topic(INCREASE_LIQUIDITY_SIGNATURE),
            format!("0x{}", encode_word(U256::from(token_id))),
        ],
        data: format!(
            "0x{}{}{}",
            encode_word(U256::from(1_000_000u64)),
            encode_word(U256::from(250u64)),
            encode_word(U256::from(750u64))
        ),
    }
}

#[test]
fn test_find_increase_liquidity_in_receipt() {
    let transfer = LogEntry {
        address: format!("0x{WETH}"),
        topics: vec![event_topic("Transfer(address,address,uint256)")],
        data: format!("0x{}", encode_word(U256::one())),
    };
    let receipt = TransactionReceipt {
        logs: vec![transfer, increase_liquidity_log(424_242)],
    };

    let minted = find_increase_liquidity(&receipt).unwrap().unwrap();
    assert_eq!(minted.token_id, U256::from(424_242u64));
    assert_eq!(minted.event.liquidity, U256::from(1_000_000u64));
    assert_eq!(minted.event.amount0, U256::from(250u64));
    assert_eq!(minted.event.amount1, U256::from(750u64));
}

#[test]
fn test_receipt_without_mint_is_none() {
    let receipt = TransactionReceipt { logs: vec![] };
    assert!(find_increase_liquidity(&receipt).unwrap().is_none());
}

#[test]
fn test_mint_log_missing_token_id_is_an_error() {
    let mut log = increase_liquidity_log(1);
    log.topics.truncate(1);
    let receipt = TransactionReceipt { logs: vec![log] };
    assert!(find_increase_liquidity(&receipt).is_err());
}

#[test]
fn test_receipt_from_rpc_body() {
    let log = increase_liquidity_log(99);
    let body = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": {
            "transactionHash": "0xabc",
            "logs": [{
                "address": log.address,
                "topics": log.topics,
                "data": log.data,
                "logIndex": "0x0"
            }]
        }
    })
    .to_string();

    let receipt = parse_receipt(&body).unwrap();
    let minted = find_increase_liquidity(&receipt).unwrap().unwrap();
    assert_eq!(minted.token_id, U256::from(99u64));
}

#[test]
fn test_position_read_round_trip_through_rpc() {
    let request = eth_call_request(3, "0xc36442b4a4522e871399cd717abdd847ab11fe88", &positions_call(U256::from(7u64)));
    assert_eq!(request.method, "eth_call");

    let body = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 3,
        "result": format!("0x{}", position_blob())
    })
    .to_string();

    let data = parse_call_result(&body).unwrap();
    let position = decode_position(&data).unwrap();
    assert_eq!(position.tick_upper, 887_220);
}

#[test]
fn test_decode_decrease_liquidity() {
    let data = format!(
        "0x{}{}{}",
        encode_word(U256::from(500_000u64)),
        encode_word(U256::from(125u64)),
        encode_word(U256::zero())
    );
    let event = decode_decrease_liquidity(&data).unwrap();
    assert_eq!(event.liquidity, U256::from(500_000u64));
    assert_eq!(event.amount0, U256::from(125u64));
    assert!(event.amount1.is_zero());

    assert_ne!(
        event_topic(DECREASE_LIQUIDITY_SIGNATURE),
        event_topic(INCREASE_LIQUIDITY_SIGNATURE)
    );
    assert!(decode_decrease_liquidity(&data[..data.len() - 64]).is_err());
}

#[test]
fn test_receipt_request_body() {
    let tx_hash = format!("0x{}", "ab".repeat(32));
    let request = transaction_receipt_request(11, &tx_hash);
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 11);
    assert_eq!(body["method"], "eth_getTransactionReceipt");
    assert_eq!(body["params"], serde_json::json!([tx_hash]));
}
