use anyhow::Result;

use super::{dashboard, events, gyms, login, plans, Context};
use crate::routes::{settle, View};

/// Navigate like the browser dashboard: follow redirects, then render.
pub async fn open(ctx: &mut Context, path: &str) -> Result<()> {
    let view = settle(path, &ctx.session);
    if view.path() != path.trim_end_matches('/') {
        println!("Redirecting to {}", view);
    }

    match view {
        View::Login => login::login(ctx, None).await,
        View::Dashboard => dashboard::show_dashboard(ctx).await,
        View::Users => dashboard::list_users(ctx).await,
        View::Gyms => gyms::list_gyms(ctx).await,
        View::GymDetail(id) => gyms::show_gym(ctx, &id).await,
        View::Transactions(id) => gyms::show_transactions(ctx, &id).await,
        View::Approvals => gyms::list_approvals(ctx).await,
        View::DietPlans => plans::list_plans(ctx).await,
        View::Events => events::list_events(ctx).await,
    }
}
