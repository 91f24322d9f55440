use domain::{ArticleCatalog, TroubleshootingArticle};

/// 文章搜索框状态。
pub struct ArticleSearch {
    catalog: &'static ArticleCatalog,
    query: String,
}

impl ArticleSearch {
    pub fn new(catalog: &'static ArticleCatalog) -> Self {
        Self {
            catalog,
            query: String::new(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> Vec<&'static TroubleshootingArticle> {
        self.catalog.search(&self.query)
    }
}
