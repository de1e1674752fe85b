mod inmemory;
mod postgres;

pub use inmemory::InMemoryMeasurementRepo;
use lifetrack_domain::{Measurement, ID};
pub use postgres::PostgresMeasurementRepo;

#[async_trait::async_trait]
pub trait IMeasurementRepo: Send + Sync {
    async fn insert(&self, measurement: &Measurement) -> anyhow::Result<()>;
    async fn find(&self, measurement_id: &ID) -> anyhow::Result<Option<Measurement>>;
    async fn delete(&self, measurement_id: &ID) -> anyhow::Result<Option<Measurement>>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context_inmemory;
    use lifetrack_domain::{Entity, Measurement, ID};

    #[tokio::test]
    async fn create_find_and_delete() {
        let ctx = setup_context_inmemory();
        let measurement =
            Measurement::new(ID::new(), ID::new(), 5.0, ID::new(), Some(ID::new()), 0);

        assert!(ctx.repos.measurements.insert(&measurement).await.is_ok());

        let res = ctx
            .repos
            .measurements
            .find(&measurement.id)
            .await
            .unwrap()
            .unwrap();
        assert!(res.eq(&measurement));

        let res = ctx
            .repos
            .measurements
            .delete(&measurement.id)
            .await
            .unwrap();
        assert!(res.is_some());
        assert!(ctx
            .repos
            .measurements
            .find(&measurement.id)
            .await
            .unwrap()
            .is_none());
    }
}
