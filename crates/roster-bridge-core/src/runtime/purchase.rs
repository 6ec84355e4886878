// roster-bridge-core/src/runtime/purchase.rs
// ============================================================================
// Module: Purchase Checker
// Description: Paid-order scan for a customer/product pair.
// Purpose: Decide whether a customer has purchased a specific product.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The purchase check queries the storefront for the customer's paid orders
//! and scans line items for the numeric form of the requested product id.
//! Only the first page of orders is inspected; large order histories can
//! yield false negatives (a known limitation, exercised in tests).

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::identifiers::CustomerId;
use crate::core::identifiers::ProductId;
use crate::interfaces::SharedStorefront;
use crate::interfaces::StorefrontError;

// ============================================================================
// SECTION: Checker
// ============================================================================

/// Checks purchase history against the storefront platform.
#[derive(Clone)]
pub struct PurchaseChecker {
    /// Storefront client.
    storefront: SharedStorefront,
}

impl PurchaseChecker {
    /// Creates a checker over the given storefront.
    #[must_use]
    pub fn new(storefront: SharedStorefront) -> Self {
        Self {
            storefront,
        }
    }

    /// Returns whether a paid order of `customer` contains `product`.
    ///
    /// A product id with no numeric form matches nothing and yields
    /// `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError`] when the order query fails.
    pub async fn has_purchased(
        &self,
        customer: &CustomerId,
        product: &ProductId,
    ) -> Result<bool, StorefrontError> {
        let Some(target) = product.as_numeric() else {
            return Ok(false);
        };
        let orders = self.storefront.paid_orders(customer).await?;
        let purchased = orders
            .iter()
            .flat_map(|order| order.line_items.iter())
            .any(|item| item.product_id == Some(target));
        Ok(purchased)
    }
}
