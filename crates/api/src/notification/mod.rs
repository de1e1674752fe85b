mod complete_notification;
mod get_pending_notifications;
mod skip_notification;
mod undo_notification;

use actix_web::web;
use complete_notification::complete_notification_controller;
use get_pending_notifications::get_pending_notifications_controller;
use skip_notification::skip_notification_controller;
use undo_notification::undo_notification_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user/{user_id}/notifications/pending",
        web::get().to(get_pending_notifications_controller),
    );
    cfg.route(
        "/user/{user_id}/notifications/{notification_id}/complete",
        web::post().to(complete_notification_controller),
    );
    cfg.route(
        "/user/{user_id}/notifications/{notification_id}/skip",
        web::post().to(skip_notification_controller),
    );
    cfg.route(
        "/user/{user_id}/notifications/{notification_id}/undo",
        web::post().to(undo_notification_controller),
    );
}
