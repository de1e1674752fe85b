use crate::error::LifetrackError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use lifetrack_api_structs::complete_notification::*;
use lifetrack_domain::{Measurement, NotificationStatus, StateTransitionError, ID};
use lifetrack_infra::LifetrackContext;
use tracing::error;

pub async fn complete_notification_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<LifetrackContext>,
) -> Result<HttpResponse, LifetrackError> {
    let usecase = CompleteNotificationUseCase {
        user_id: path.user_id.clone(),
        notification_id: path.notification_id.clone(),
        value: body.0.value,
        unit_id: body.0.unit_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                measurement_id: res.measurement_id,
            })
        })
        .map_err(LifetrackError::from)
}

#[derive(Debug)]
struct CompleteNotificationUseCase {
    pub user_id: ID,
    pub notification_id: ID,
    pub value: f64,
    pub unit_id: ID,
}

#[derive(Debug)]
struct UseCaseRes {
    pub measurement_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    NotOwner(ID),
    InvalidValue(f64),
    InvalidState(NotificationStatus),
    /// The measurement was persisted but the notification could not be
    /// marked completed, leaving the two stores out of sync
    MeasurementOrphaned(ID),
    Storage,
}

impl From<UseCaseError> for LifetrackError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(notification_id) => Self::NotFound(format!(
                "The notification with id: {}, was not found.",
                notification_id
            )),
            UseCaseError::NotOwner(notification_id) => Self::Forbidden(format!(
                "The notification with id: {}, belongs to another user.",
                notification_id
            )),
            UseCaseError::InvalidValue(value) => Self::BadClientData(format!(
                "The provided value: {}, is not a valid measurement value. Please enter a valid number.",
                value
            )),
            UseCaseError::InvalidState(status) => Self::Conflict(format!(
                "The notification is {} and can only be completed while pending.",
                status
            )),
            UseCaseError::MeasurementOrphaned(measurement_id) => Self::Conflict(format!(
                "The measurement with id: {}, was recorded, but the notification could not be marked as completed. The measurement was kept.",
                measurement_id
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CompleteNotificationUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CompleteNotification";

    async fn execute(&mut self, ctx: &LifetrackContext) -> Result<Self::Response, Self::Error> {
        if !self.value.is_finite() {
            return Err(UseCaseError::InvalidValue(self.value));
        }

        let notification = ctx
            .repos
            .notifications
            .find(&self.notification_id)
            .await
            .map_err(|e| {
                error!("Failed to fetch notification: {:?}", e);
                UseCaseError::Storage
            })?;
        let mut notification = match notification {
            Some(notification) => notification,
            None => return Err(UseCaseError::NotFound(self.notification_id.clone())),
        };
        if notification.user_id != self.user_id {
            return Err(UseCaseError::NotOwner(self.notification_id.clone()));
        }

        let measurement = Measurement::new(
            self.user_id.clone(),
            notification.variable_id.clone(),
            self.value,
            self.unit_id.clone(),
            Some(notification.id.clone()),
            ctx.sys.get_timestamp_millis(),
        );
        notification
            .complete(self.value, measurement.id.clone())
            .map_err(|StateTransitionError::Illegal { current, .. }| {
                UseCaseError::InvalidState(current)
            })?;

        // Two writes with no shared transaction. If the second fails the
        // measurement is kept and the caller is told which one it was.
        ctx.repos
            .measurements
            .insert(&measurement)
            .await
            .map_err(|e| {
                error!("Failed to insert measurement: {:?}", e);
                UseCaseError::Storage
            })?;
        ctx.repos
            .notifications
            .save(&notification)
            .await
            .map_err(|e| {
                error!(
                    "Failed to mark notification as completed, measurement: {} is orphaned: {:?}",
                    measurement.id, e
                );
                UseCaseError::MeasurementOrphaned(measurement.id.clone())
            })?;

        Ok(UseCaseRes {
            measurement_id: measurement.id.clone(),
        })
    }
}
