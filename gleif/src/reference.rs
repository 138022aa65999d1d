use chrono::Utc;
use gleif_core::{GleifError, ReferenceFailure, ReferenceKind, ReferenceReport, ReferenceSnapshot};
use serde_json::{Map, Value};

use crate::core::Gleif;

/// Flatten a JSON:API item to `{ "id": <id>, ...attributes }`.
///
/// Attributes never override the item's `id`.
#[must_use]
pub fn flatten_reference_item(item: &Value) -> Value {
    let mut out = Map::new();
    out.insert(
        "id".to_string(),
        item.get("id").cloned().unwrap_or(Value::Null),
    );
    if let Some(attrs) = item.get("attributes").and_then(Value::as_object) {
        for (k, v) in attrs {
            if k != "id" {
                out.insert(k.clone(), v.clone());
            }
        }
    }
    Value::Object(out)
}

impl Gleif {
    /// Snapshot every item of one reference resource.
    ///
    /// # Errors
    /// Returns the failure that stopped pagination; a partial lookup table is
    /// never returned.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "gleif::reference_data", skip(self), fields(kind = %kind))
    )]
    pub async fn reference_data(
        &self,
        kind: ReferenceKind,
    ) -> Result<ReferenceSnapshot, GleifError> {
        let url = self.url(kind.as_str());
        let run = self
            .fetch_all_pages(&url, &[], self.cfg.reference_page_size)
            .await;
        if let Some(e) = run.error {
            return Err(e);
        }
        let items: Vec<Value> = run.items.iter().map(flatten_reference_item).collect();
        #[cfg(feature = "tracing")]
        tracing::info!(count = items.len(), pages = run.pages_fetched, "reference data fetched");
        Ok(ReferenceSnapshot {
            timestamp: Utc::now(),
            kind,
            description: kind.description().to_string(),
            count: items.len(),
            items,
        })
    }

    /// Snapshot every reference resource in turn.
    ///
    /// A failing resource is recorded and the remaining ones are still fetched.
    pub async fn reference_data_all(&self) -> ReferenceReport {
        let mut report = ReferenceReport::default();
        for kind in ReferenceKind::ALL {
            match self.reference_data(kind).await {
                Ok(snapshot) => report.snapshots.push(snapshot),
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!(kind = %kind, error = %error, "reference data failed");
                    report.failures.push(ReferenceFailure { kind, error });
                }
            }
        }
        report
    }
}
