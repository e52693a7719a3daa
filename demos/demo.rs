//! Chaining demo showing happy and unhappy paths.
//!
//! Run with: cargo run --example demo

use fuseline::{expect_value, ActionArg, Context, InjectionBehavior, Value};
use thiserror::Error;

const UNIT_PRICE_CENTS: u64 = 250;
const STOCK: u32 = 40;

// ============================================================================
// Error type
// ============================================================================

#[derive(Debug, Clone, Error)]
enum ReceiptError {
    #[error("quantity `{0}` is not a number")]
    BadQuantity(String),
    #[error("quantity {0} exceeds stock")]
    OutOfStock(u32),
}

// ============================================================================
// Actions
// ============================================================================

/// Action 1: parse the raw quantity.
fn parse_quantity(raw: &str) -> Result<Option<Value>, ReceiptError> {
    println!("  [parse] Parsing quantity {raw:?}...");
    match raw.trim().parse::<u32>() {
        Ok(quantity) => {
            println!("  [parse] Quantity is {quantity}");
            Ok(Some(Value::new(quantity)))
        }
        Err(_) => {
            println!("  [parse] FAILED - not a number!");
            Err(ReceiptError::BadQuantity(raw.to_string()))
        }
    }
}

/// Action 2: reject quantities above stock.
fn check_stock(value: Option<Value>) -> Result<Option<Value>, ReceiptError> {
    let quantity = expect_value::<u32>(value);
    println!("  [stock] Checking {quantity} against stock of {STOCK}...");
    if quantity > STOCK {
        println!("  [stock] FAILED - not enough on hand!");
        return Err(ReceiptError::OutOfStock(quantity));
    }
    Ok(Some(Value::new(quantity)))
}

/// Action 3: price the order.
fn price_order(value: Option<Value>) -> Result<Option<Value>, ReceiptError> {
    let quantity = expect_value::<u32>(value);
    let total = u64::from(quantity) * UNIT_PRICE_CENTS;
    println!("  [price] {quantity} units at {UNIT_PRICE_CENTS} cents = {total} cents");
    Ok(Some(Value::new(total)))
}

/// Action 4: format the receipt line.
fn format_receipt(value: Option<Value>) -> Result<Option<Value>, ReceiptError> {
    let total = expect_value::<u64>(value);
    let line = format!("TOTAL: ${}.{:02}", total / 100, total % 100);
    println!("  [format] {line}");
    Ok(Some(Value::new(line)))
}

// ============================================================================
// Demo scenarios
// ============================================================================

fn main() {
    println!("== fuseline demo: receipts ==\n");

    // Scenario 1: happy path, every action runs.
    run_receipt("12");

    // Scenario 2: the parse fails, everything after it is skipped.
    run_receipt("a dozen");

    // Scenario 3: boolean adapters inline into conditions.
    run_inventory_checks();

    println!("\nDone.");
}

fn run_receipt(raw: &str) {
    println!("-- receipt for quantity {raw:?} --");

    let mut chain: Context<ReceiptError> = Context::new();
    chain.apply_nullary_value(|| parse_quantity(raw), InjectionBehavior::NotSpecified);
    chain.apply_unary_value(check_stock, ActionArg::use_previous());
    chain.apply_unary_value(price_order, ActionArg::use_previous());
    chain.apply_unary_value(format_receipt, ActionArg::use_previous());

    // One check for the whole chain.
    match chain.flush() {
        (Some(receipt), None) => {
            println!("  receipt ready: {}\n", receipt.cast::<String>());
        }
        (_, Some(error)) => println!("  receipt failed: {error}\n"),
        (None, None) => println!("  nothing to do\n"),
    }
}

fn run_inventory_checks() {
    println!("-- inventory checks --");

    let mut chain: Context<ReceiptError> = Context::new();
    let available = chain.apply_nullary_bool(|| Ok(3 <= STOCK), InjectionBehavior::NotSpecified);
    println!("  3 units available: {available}");
    let _ = chain.flush();

    // A faulted chain answers false without running the check.
    chain.apply_nullary_void(
        || Err(ReceiptError::BadQuantity("???".into())),
        InjectionBehavior::NotSpecified,
    );
    let available = chain.apply_nullary_bool(
        || unreachable!("skipped on a faulted chain"),
        InjectionBehavior::NotSpecified,
    );
    println!("  check on a faulted chain: {available}");

    let (_, error) = chain.flush();
    println!(
        "  fault behind the false answer: {}\n",
        error.map_or_else(|| "none".to_string(), |e| e.to_string())
    );
}
