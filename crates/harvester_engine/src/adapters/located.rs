use futures_util::future::join_all;
use harvester_core::{
    grid, merge_by_identity, Coordinate, GridPoint, HarvestResult, NormalizedItem, LOCATED,
};
use serde_json::json;

use crate::engine::Harvester;
use crate::trace::HarvestEvent;
use crate::HarvestError;

/// Search filter restricting results to geotagged uploads.
const LOCATED_PARAMS: &str = "EgIIAQ%3D%3D";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatedQuery {
    pub center: Coordinate,
    pub step_km: f64,
    pub radius_km: f64,
    pub per_point_limit: usize,
    /// Cap applied after deduplication; `None` keeps everything.
    pub max_items: Option<usize>,
}

impl LocatedQuery {
    pub fn new(center: Coordinate) -> Self {
        Self {
            center,
            step_km: 10.0,
            radius_km: 50.0,
            per_point_limit: 20,
            max_items: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocatedHarvest {
    pub cells_scanned: usize,
    pub cells_failed: usize,
    pub items: HarvestResult,
}

fn radius_param(step_km: f64) -> String {
    format!("{step_km}km")
}

impl Harvester {
    /// Geotagged videos near one point.
    pub async fn located_at(
        &self,
        point: &GridPoint,
        radius_km: f64,
        max_items: usize,
    ) -> Result<HarvestResult, HarvestError> {
        let seed = self.context.seed_payload([
            ("query", json!("*")),
            ("params", json!(LOCATED_PARAMS)),
            ("location", json!(point.location())),
            ("locationRadius", json!(radius_param(radius_km))),
            ("maxResults", json!(max_items)),
        ]);
        let items = self
            .harvest(&LOCATED, LOCATED.endpoint, &seed, max_items)
            .await?;
        Ok(items
            .into_iter()
            .map(|item| match item {
                NormalizedItem::Located(mut video) => {
                    video.origin = Some(*point);
                    NormalizedItem::Located(video)
                }
                other => other,
            })
            .collect())
    }

    /// Search every lattice point around the query center and merge the
    /// results by video id.
    pub async fn located_videos(
        &self,
        query: &LocatedQuery,
    ) -> Result<LocatedHarvest, HarvestError> {
        let points = grid(query.center, query.step_km, query.radius_km);
        self.fan_out(&points, query.step_km, query.per_point_limit, query.max_items)
            .await
    }

    /// One located search per point, run concurrently through the fan-out
    /// pool. A failing cell is traced and contributes nothing; only when
    /// every cell fails is the call an error.
    pub async fn fan_out(
        &self,
        points: &[GridPoint],
        cell_radius_km: f64,
        per_point_limit: usize,
        max_items: Option<usize>,
    ) -> Result<LocatedHarvest, HarvestError> {
        let cells = points.iter().map(|point| async move {
            let _permit = self.pool.acquire().await;
            let result = self.located_at(point, cell_radius_km, per_point_limit).await;
            (point, result)
        });
        let outcomes = join_all(cells).await;

        let mut branches = Vec::with_capacity(outcomes.len());
        let mut first_error = None;
        let mut failed = 0;
        for (point, result) in outcomes {
            match result {
                Ok(items) => branches.push(items),
                Err(err) => {
                    failed += 1;
                    self.emit(HarvestEvent::CellFailed {
                        point: *point,
                        error: err.to_string(),
                    });
                    first_error.get_or_insert(err);
                }
            }
        }

        if !points.is_empty() && failed == points.len() {
            if let Some(first) = first_error {
                return Err(HarvestError::GridFailed {
                    cells: points.len(),
                    first: Box::new(first),
                });
            }
        }

        let mut items = merge_by_identity(branches);
        if let Some(cap) = max_items {
            items.truncate(cap);
        }
        Ok(LocatedHarvest {
            cells_scanned: points.len(),
            cells_failed: failed,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::radius_param;

    #[test]
    fn radius_renders_without_trailing_zeroes() {
        assert_eq!(radius_param(10.0), "10km");
        assert_eq!(radius_param(2.5), "2.5km");
    }
}
