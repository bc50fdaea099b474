use actix_web::{Responder, web};
use tracing::trace;

use crate::api::AppState;
use crate::api::middleware::OwnerId;

use super::helpers::api_result;

/// 单链接统计：点击、线索、转化率、最近事件与提交
pub async fn get_link_stats(
    owner: web::ReqData<OwnerId>,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    trace!("Admin API: stats for link {}", path.as_str());
    api_result(state.stats.link_stats(&owner.0, &path).await)
}
