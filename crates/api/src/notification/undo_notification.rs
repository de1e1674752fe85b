use crate::error::LifetrackError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use lifetrack_api_structs::undo_notification::*;
use lifetrack_domain::{
    NotificationStatus, ReminderNotification, StateTransitionError, ID,
};
use lifetrack_infra::LifetrackContext;
use tracing::error;

pub async fn undo_notification_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<LifetrackContext>,
) -> Result<HttpResponse, LifetrackError> {
    let usecase = UndoNotificationUseCase {
        user_id: path.user_id.clone(),
        notification_id: path.notification_id.clone(),
        prior_status: body.0.prior_status,
        measurement_id: body.0.measurement_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(LifetrackError::from)
}

#[derive(Debug)]
struct UndoNotificationUseCase {
    pub user_id: ID,
    pub notification_id: ID,
    /// The status the caller believes the notification is in; a mismatch
    /// means the caller acted on a stale inbox
    pub prior_status: NotificationStatus,
    pub measurement_id: Option<ID>,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    NotOwner(ID),
    MissingMeasurementId,
    MeasurementMismatch(ID),
    StatusMismatch {
        expected: NotificationStatus,
        actual: NotificationStatus,
    },
    InvalidState(NotificationStatus),
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
            UseCaseError::MissingMeasurementId => Self::BadClientData(
                "Undoing a completed notification requires the measurementId of the measurement it created.".into(),
            ),
            UseCaseError::MeasurementMismatch(measurement_id) => Self::BadClientData(format!(
                "The measurement with id: {}, was not created by this notification.",
                measurement_id
            )),
            UseCaseError::StatusMismatch { expected, actual } => Self::Conflict(format!(
                "The notification was expected to be {} but is {}.",
                expected, actual
            )),
            UseCaseError::InvalidState(status) => Self::Conflict(format!(
                "The notification is {} and there is nothing to undo.",
                status
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UndoNotificationUseCase {
    type Response = ReminderNotification;

    type Error = UseCaseError;

    const NAME: &'static str = "UndoNotification";

    async fn execute(&mut self, ctx: &LifetrackContext) -> Result<Self::Response, Self::Error> {
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
        if notification.status != self.prior_status {
            return Err(UseCaseError::StatusMismatch {
                expected: self.prior_status,
                actual: notification.status,
            });
        }

        // Undoing a completion retracts its side effect first: the
        // measurement is deleted before the notification row is reset.
        if notification.status == NotificationStatus::Completed {
            let measurement_id = self
                .measurement_id
                .as_ref()
                .ok_or(UseCaseError::MissingMeasurementId)?;
            if notification.measurement_id.as_ref() != Some(measurement_id) {
                return Err(UseCaseError::MeasurementMismatch(measurement_id.clone()));
            }
            ctx.repos
                .measurements
                .delete(measurement_id)
                .await
                .map_err(|e| {
                    error!("Failed to delete measurement: {:?}", e);
                    UseCaseError::Storage
                })?;
        }

        notification
            .undo()
            .map_err(|StateTransitionError::Illegal { current, .. }| {
                UseCaseError::InvalidState(current)
            })?;

        ctx.repos
            .notifications
            .save(&notification)
            .await
            .map_err(|e| {
                error!("Failed to reset notification to pending: {:?}", e);
                UseCaseError::Storage
            })?;

        Ok(notification)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono_tz::UTC;
    use lifetrack_domain::{
        Measurement, RecurrenceRule, ReminderSchedule, TimeOfDay,
    };
    use lifetrack_infra::{setup_context_inmemory, LifetrackContext};

    struct TestContext {
        ctx: LifetrackContext,
        user_id: ID,
        notification: ReminderNotification,
    }

    async fn setup() -> TestContext {
        let ctx = setup_context_inmemory();
        let user_id = ID::new();
        let schedule = ReminderSchedule::new(
            user_id.clone(),
            ID::new(),
            "FREQ=DAILY".parse::<RecurrenceRule>().unwrap(),
            TimeOfDay::new(9, 0).unwrap(),
            UTC,
            0,
        );
        let notification = ReminderNotification::new(
            &schedule,
            1000,
            "Daily Mood Log".into(),
            "out of 10".into(),
            "Mood".into(),
            None,
        );
        ctx.repos.notifications.insert(&notification).await.unwrap();

        TestContext {
            ctx,
            user_id,
            notification,
        }
    }

    /// Complete the notification the way the complete operation does:
    /// insert the measurement, then save the completed row.
    async fn complete(test_ctx: &mut TestContext, value: f64) -> ID {
        let measurement = Measurement::new(
            test_ctx.user_id.clone(),
            test_ctx.notification.variable_id.clone(),
            value,
            ID::new(),
            Some(test_ctx.notification.id.clone()),
            0,
        );
        test_ctx
            .ctx
            .repos
            .measurements
            .insert(&measurement)
            .await
            .unwrap();
        test_ctx
            .notification
            .complete(value, measurement.id.clone())
            .unwrap();
        test_ctx
            .ctx
            .repos
            .notifications
            .save(&test_ctx.notification)
            .await
            .unwrap();
        measurement.id
    }

    #[actix_web::test]
    async fn undo_completion_restores_pending_state_and_deletes_measurement() {
        let mut test_ctx = setup().await;
        let measurement_id = complete(&mut test_ctx, 5.0).await;
        let TestContext {
            ctx,
            user_id,
            notification,
        } = test_ctx;

        let mut usecase = UndoNotificationUseCase {
            user_id: user_id.clone(),
            notification_id: notification.id.clone(),
            prior_status: NotificationStatus::Completed,
            measurement_id: Some(measurement_id.clone()),
        };

        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.status, NotificationStatus::Pending);
        assert_eq!(res.logged_value, None);
        assert_eq!(res.measurement_id, None);

        // The measurement is gone and the notification is back in the inbox
        assert!(ctx
            .repos
            .measurements
            .find(&measurement_id)
            .await
            .unwrap()
            .is_none());
        let pending = ctx
            .repos
            .notifications
            .find_pending_by_user(&user_id, None)
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, notification.id);
    }

    #[actix_web::test]
    async fn undo_skip_restores_pending_state() {
        let TestContext {
            ctx,
            user_id,
            mut notification,
        } = setup().await;
        notification.skip().unwrap();
        ctx.repos.notifications.save(&notification).await.unwrap();

        let mut usecase = UndoNotificationUseCase {
            user_id,
            notification_id: notification.id.clone(),
            prior_status: NotificationStatus::Skipped,
            measurement_id: None,
        };

        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.status, NotificationStatus::Pending);
    }

    #[actix_web::test]
    async fn undo_completion_requires_measurement_id() {
        let mut test_ctx = setup().await;
        let _measurement_id = complete(&mut test_ctx, 5.0).await;
        let TestContext {
            ctx,
            user_id,
            notification,
        } = test_ctx;

        let mut usecase = UndoNotificationUseCase {
            user_id,
            notification_id: notification.id.clone(),
            prior_status: NotificationStatus::Completed,
            measurement_id: None,
        };

        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::MissingMeasurementId)
        ));

        // Nothing was undone
        let stored = ctx
            .repos
            .notifications
            .find(&notification.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, NotificationStatus::Completed);
    }

    #[actix_web::test]
    async fn rejects_stale_prior_status() {
        let TestContext {
            ctx,
            user_id,
            notification,
        } = setup().await;

        // Caller believes it skipped the notification, but it is pending
        let mut usecase = UndoNotificationUseCase {
            user_id,
            notification_id: notification.id.clone(),
            prior_status: NotificationStatus::Skipped,
            measurement_id: None,
        };

        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::StatusMismatch { .. })
        ));
    }

    #[actix_web::test]
    async fn rejects_undo_of_pending_notification() {
        let TestContext {
            ctx,
            user_id,
            notification,
        } = setup().await;

        let mut usecase = UndoNotificationUseCase {
            user_id,
            notification_id: notification.id.clone(),
            prior_status: NotificationStatus::Pending,
            measurement_id: None,
        };

        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidState(NotificationStatus::Pending))
        ));
    }

    #[actix_web::test]
    async fn rejects_foreign_user() {
        let mut test_ctx = setup().await;
        let measurement_id = complete(&mut test_ctx, 5.0).await;
        let TestContext {
            ctx, notification, ..
        } = test_ctx;

        let mut usecase = UndoNotificationUseCase {
            user_id: ID::new(),
            notification_id: notification.id.clone(),
            prior_status: NotificationStatus::Completed,
            measurement_id: Some(measurement_id.clone()),
        };

        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotOwner(_))
        ));

        // The measurement was not touched
        assert!(ctx
            .repos
            .measurements
            .find(&measurement_id)
            .await
            .unwrap()
            .is_some());
    }
}
