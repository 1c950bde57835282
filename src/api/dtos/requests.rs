use serde::Deserialize;

#[derive(Deserialize)]
pub struct BulkUserActionRequest {
    pub user_ids: Vec<String>,
    pub action: String,
    pub value: Option<i64>,
}

#[derive(Deserialize)]
pub struct ListUsersQuery {
    pub plan: Option<String>,
    pub risk: Option<String>,
}
