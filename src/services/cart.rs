// src/services/cart.rs
use crate::error::{StoreError, StoreResult};
use crate::models::cart::{CartLine, CartResponse, CartSummary};
use crate::models::product::Product;
use crate::taxonomy::Size;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Largest quantity a single bag line may hold.
pub const MAX_LINE_QTY: u32 = 99;

/// A shopping bag. Lines are kept in the order they were first added.
#[derive(Debug, Clone)]
pub struct Cart {
    pub id: Uuid,
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4(), lines: Vec::new() }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Adds `qty` of a product variant, merging into an existing line for the
    /// same product, size and color.
    pub fn add(
        &mut self,
        product: &Product,
        size: Size,
        color: Option<String>,
        qty: u32,
    ) -> StoreResult<&CartLine> {
        if qty == 0 {
            return Err(StoreError::InvalidInput("quantity must be at least 1".to_string()));
        }
        if qty > MAX_LINE_QTY {
            return Err(StoreError::InvalidInput(format!(
                "quantity may not exceed {}",
                MAX_LINE_QTY
            )));
        }
        if !size.fits(product.category) {
            return Err(StoreError::InvalidInput(format!(
                "size {:?} is not offered for {}",
                size, product.title
            )));
        }

        let existing = self
            .lines
            .iter()
            .position(|l| l.product_id == product.id && l.size == size && l.color == color);

        let index = match existing {
            Some(i) => {
                let merged = self.lines[i].qty + qty;
                if merged > MAX_LINE_QTY {
                    return Err(StoreError::InvalidInput(format!(
                        "{} already has {} in the bag; at most {} per line",
                        product.title, self.lines[i].qty, MAX_LINE_QTY
                    )));
                }
                self.lines[i].qty = merged;
                i
            }
            None => {
                self.lines.push(CartLine {
                    line_id: Uuid::new_v4(),
                    product_id: product.id,
                    title: product.title.clone(),
                    unit_price: product.price,
                    image: product.image.clone(),
                    size,
                    color,
                    qty,
                });
                self.lines.len() - 1
            }
        };

        Ok(&self.lines[index])
    }

    /// Applies a signed quantity change, clamped to `1..=MAX_LINE_QTY`. Removing a
    /// line is a separate, explicit action.
    pub fn adjust(&mut self, line_id: Uuid, delta: i32) -> StoreResult<&CartLine> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.line_id == line_id)
            .ok_or_else(|| StoreError::NotFound(format!("Cart line {}", line_id)))?;

        let next = i64::from(line.qty) + i64::from(delta);
        line.qty = next.clamp(1, i64::from(MAX_LINE_QTY)) as u32;
        Ok(line)
    }

    pub fn remove(&mut self, line_id: Uuid) -> StoreResult<CartLine> {
        let index = self
            .lines
            .iter()
            .position(|l| l.line_id == line_id)
            .ok_or_else(|| StoreError::NotFound(format!("Cart line {}", line_id)))?;
        Ok(self.lines.remove(index))
    }

    pub fn summary(&self) -> CartSummary {
        let subtotal = self
            .lines
            .iter()
            .map(CartLine::line_total)
            .sum::<Decimal>()
            .round_dp(2);
        let shipping = Decimal::ZERO;
        let estimated_tax = Decimal::ZERO;

        CartSummary {
            subtotal,
            shipping,
            estimated_tax,
            total: subtotal + shipping + estimated_tax,
            total_items: self.lines.iter().map(|l| u64::from(l.qty)).sum(),
        }
    }

    pub fn to_response(&self) -> CartResponse {
        CartResponse {
            cart_id: self.id,
            lines: self.lines.clone(),
            summary: self.summary(),
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-local cart registry. Carts vanish on restart and are never evicted
/// before that; creation is rate limited per client instead.
#[derive(Default)]
pub struct CartStore {
    carts: RwLock<HashMap<Uuid, Cart>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> CartResponse {
        let cart = Cart::new();
        let response = cart.to_response();
        self.carts.write().await.insert(cart.id, cart);
        tracing::info!(cart_id = %response.cart_id, "created cart");
        response
    }

    pub async fn cart_count(&self) -> usize {
        self.carts.read().await.len()
    }

    pub async fn get(&self, cart_id: Uuid) -> StoreResult<CartResponse> {
        self.carts
            .read()
            .await
            .get(&cart_id)
            .map(Cart::to_response)
            .ok_or_else(|| StoreError::NotFound(format!("Cart {}", cart_id)))
    }

    /// Runs `f` against the cart under the write lock and returns the updated cart.
    pub async fn update<F, T>(&self, cart_id: Uuid, f: F) -> StoreResult<CartResponse>
    where
        F: FnOnce(&mut Cart) -> StoreResult<T>,
    {
        let mut carts = self.carts.write().await;
        let cart = carts
            .get_mut(&cart_id)
            .ok_or_else(|| StoreError::NotFound(format!("Cart {}", cart_id)))?;
        f(cart)?;
        Ok(cart.to_response())
    }
}
