use serde::{Deserialize, Serialize};

/// Document counts shown on the landing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCounts {
    pub users: usize,
    pub gyms: usize,
    pub diet_plans: usize,
    pub events: usize,
}
