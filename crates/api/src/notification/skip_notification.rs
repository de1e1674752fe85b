use crate::error::LifetrackError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use lifetrack_api_structs::skip_notification::*;
use lifetrack_domain::{
    NotificationStatus, ReminderNotification, StateTransitionError, ID,
};
use lifetrack_infra::LifetrackContext;
use tracing::error;

pub async fn skip_notification_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<LifetrackContext>,
) -> Result<HttpResponse, LifetrackError> {
    let usecase = SkipNotificationUseCase {
        user_id: path.user_id.clone(),
        notification_id: path.notification_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(LifetrackError::from)
}

#[derive(Debug)]
struct SkipNotificationUseCase {
    pub user_id: ID,
    pub notification_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    NotOwner(ID),
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
            UseCaseError::InvalidState(status) => Self::Conflict(format!(
                "The notification is {} and can only be skipped while pending.",
                status
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SkipNotificationUseCase {
    type Response = ReminderNotification;

    type Error = UseCaseError;

    const NAME: &'static str = "SkipNotification";

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

        notification
            .skip()
            .map_err(|StateTransitionError::Illegal { current, .. }| {
                UseCaseError::InvalidState(current)
            })?;

        ctx.repos
            .notifications
            .save(&notification)
            .await
            .map_err(|e| {
                error!("Failed to mark notification as skipped: {:?}", e);
                UseCaseError::Storage
            })?;

        Ok(notification)
    }
}
