use tracing::{debug, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{CatalogEntry, Product, ReservedLine, StockLine};
use crate::product_actor::{ProductAction, ProductActionResult, ProductCreate, ProductError, ProductPatch};

/// Client for interacting with the Product actor.
///
/// Doubles as the catalog and inventory gateway of order placement.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<String, ProductError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }

    /// Current price, stock and active flag of one product.
    #[instrument(skip(self))]
    pub async fn resolve(&self, id: String) -> Result<CatalogEntry, ProductError> {
        match self.get_product(id.clone()).await? {
            Some(product) => Ok(CatalogEntry::from(&product)),
            None => Err(ProductError::NotFound(id)),
        }
    }

    /// Takes stock for every line or for none of them.
    ///
    /// Each returned line carries the unit price seen when its stock was
    /// taken, in the same order as `lines`.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn reserve_stock(&self, lines: &[StockLine]) -> Result<Vec<ReservedLine>, ProductError> {
        debug!("Sending request");
        let actions = lines
            .iter()
            .map(|line| (line.product_id.clone(), ProductAction::Reserve(line.quantity)))
            .collect();
        let results = self.inner.perform_batch(actions).await?;

        lines
            .iter()
            .zip(results)
            .map(|(line, result)| match result {
                ProductActionResult::Reserve { unit_price, .. } => Ok(ReservedLine {
                    product_id: line.product_id.clone(),
                    quantity: line.quantity,
                    unit_price,
                }),
                other => Err(ProductError::ActorCommunicationError(format!(
                    "Unexpected result {:?}",
                    other
                ))),
            })
            .collect()
    }

    /// Puts stock back, all lines in one step.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn release_stock(&self, lines: &[StockLine]) -> Result<(), ProductError> {
        if lines.is_empty() {
            return Ok(());
        }
        debug!("Sending request");
        let actions = lines
            .iter()
            .map(|line| (line.product_id.clone(), ProductAction::Release(line.quantity)))
            .collect();
        self.inner.perform_batch(actions).await.map(|_| ()).map_err(|e| {
            warn!(error = %e, "Stock release failed");
            ProductError::from(e)
        })
    }
}
