/// Stock operations on a single product, beyond plain field patches.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// Receives `n` more units into stock.
    Restock(u32),
}

/// Both actions answer with the stock level after they ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductActionResult {
    StockLevel(u32),
}
