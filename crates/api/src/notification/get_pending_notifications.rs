use crate::error::LifetrackError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use lifetrack_api_structs::get_pending_notifications::*;
use lifetrack_domain::{ReminderNotification, TimeSpan, ID};
use lifetrack_infra::LifetrackContext;
use tracing::error;

pub async fn get_pending_notifications_controller(
    path: web::Path<PathParams>,
    query: web::Query<QueryParams>,
    ctx: web::Data<LifetrackContext>,
) -> Result<HttpResponse, LifetrackError> {
    let usecase = GetPendingNotificationsUseCase {
        user_id: path.user_id.clone(),
        start_ts: query.start_ts,
        end_ts: query.end_ts,
    };

    execute(usecase, &ctx)
        .await
        .map(|notifications| HttpResponse::Ok().json(APIResponse::new(notifications)))
        .map_err(LifetrackError::from)
}

#[derive(Debug)]
struct GetPendingNotificationsUseCase {
    pub user_id: ID,
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
}

#[derive(Debug)]
enum UseCaseError {
    BadDueWindow(String),
    Storage,
}

impl From<UseCaseError> for LifetrackError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::BadDueWindow(msg) => {
                Self::BadClientData(format!("Invalid due window: {}", msg))
            }
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPendingNotificationsUseCase {
    type Response = Vec<ReminderNotification>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetPendingNotifications";

    async fn execute(&mut self, ctx: &LifetrackContext) -> Result<Self::Response, Self::Error> {
        let window = match (self.start_ts, self.end_ts) {
            (Some(start_ts), Some(end_ts)) => {
                let window = TimeSpan::new(start_ts, end_ts)
                    .map_err(|e| UseCaseError::BadDueWindow(e.to_string()))?;
                if window.duration() > ctx.config.pending_notifications_query_duration_limit {
                    return Err(UseCaseError::BadDueWindow(format!(
                        "The due window cannot be longer than {} millis",
                        ctx.config.pending_notifications_query_duration_limit
                    )));
                }
                Some(window)
            }
            (None, None) => None,
            _ => {
                return Err(UseCaseError::BadDueWindow(
                    "Both startTs and endTs must be provided when restricting on due timestamp"
                        .into(),
                ))
            }
        };

        ctx.repos
            .notifications
            .find_pending_by_user(&self.user_id, window.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to fetch pending notifications: {:?}", e);
                UseCaseError::Storage
            })
    }
}
