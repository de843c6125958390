pub struct CategoryCreateRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
