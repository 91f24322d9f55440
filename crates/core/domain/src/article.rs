//! 故障排查文章与内置目录
//!
//! 文章是静态参考内容，只从内置目录加载，不做远端修改。
//! `qr_code_id` 是贴在设备标识牌上的短码，按大小写不敏感匹配；
//! 若出现重复短码，以目录中先注册者为准。

use chrono::{DateTime, TimeZone, Utc};
use std::sync::OnceLock;
use uuid::Uuid;

/// 故障排查文章。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TroubleshootingArticle {
    pub id: Uuid,
    pub title: String,
    /// 技术栈标签，例如 "Power Systems"
    pub stack: String,
    pub category: String,
    pub content: String,
    pub tags: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub qr_code_id: String,
}

impl TroubleshootingArticle {
    /// 二维码短码是否与扫描内容相等（大小写不敏感）。
    pub fn matches_qr_code(&self, code: &str) -> bool {
        self.qr_code_id.to_lowercase() == code.to_lowercase()
    }

    /// 标题、技术栈、分类或任一标签包含查询串（大小写不敏感）。
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let contains = |text: &str| text.to_lowercase().contains(&query);
        contains(&self.title)
            || contains(&self.stack)
            || contains(&self.category)
            || self.tags.iter().any(|tag| contains(tag))
    }
}

/// 文章目录（按注册顺序）。
#[derive(Debug, Clone, Default)]
pub struct ArticleCatalog {
    articles: Vec<TroubleshootingArticle>,
}

impl ArticleCatalog {
    pub fn new(articles: Vec<TroubleshootingArticle>) -> Self {
        Self { articles }
    }

    /// 内置目录（进程内只构建一次）。
    pub fn builtin() -> &'static ArticleCatalog {
        static CATALOG: OnceLock<ArticleCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| ArticleCatalog::new(builtin_articles()))
    }

    pub fn all(&self) -> &[TroubleshootingArticle] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// 按二维码短码查找，先注册者优先。
    pub fn find_by_qr_code_id(&self, code: &str) -> Option<&TroubleshootingArticle> {
        self.articles
            .iter()
            .find(|article| article.matches_qr_code(code))
    }

    /// 文章搜索：空查询返回全部。
    pub fn search(&self, query: &str) -> Vec<&TroubleshootingArticle> {
        if query.is_empty() {
            return self.articles.iter().collect();
        }
        self.articles
            .iter()
            .filter(|article| article.matches_query(query))
            .collect()
    }
}

/// 内置文章 ID：以短码派生的 v5 UUID，保证跨进程稳定。
pub fn article_id(qr_code_id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("article:{qr_code_id}").as_bytes())
}

struct ArticleSeed {
    qr_code_id: &'static str,
    title: &'static str,
    stack: &'static str,
    category: &'static str,
    content: &'static str,
    tags: &'static [&'static str],
}

const SEEDS: [ArticleSeed; 5] = [
    ArticleSeed {
        qr_code_id: "PSU",
        title: "Power Supply Unit (PSU) Failure Troubleshooting",
        stack: "Power Systems",
        category: "Data Center Hardware",
        content: include_str!("../articles/psu.md"),
        tags: &["PSU", "Power Supply", "Hardware", "Data Center", "Server", "Electrical", "Failure"],
    },
    ArticleSeed {
        qr_code_id: "CRAC",
        title: "Cooling System (CRAC) Failure Troubleshooting",
        stack: "HVAC Systems",
        category: "Data Center Infrastructure",
        content: include_str!("../articles/crac.md"),
        tags: &["CRAC", "Cooling", "HVAC", "Temperature", "Data Center", "Infrastructure", "Climate Control"],
    },
    ArticleSeed {
        qr_code_id: "NETWORK",
        title: "Network Infrastructure Troubleshooting Guide",
        stack: "Networking",
        category: "Data Center Infrastructure",
        content: include_str!("../articles/network.md"),
        tags: &["Network", "Switch", "Router", "Ethernet", "VLAN", "Connectivity", "Infrastructure"],
    },
    ArticleSeed {
        qr_code_id: "SERVER",
        title: "Server Hardware Failure Troubleshooting",
        stack: "Server Hardware",
        category: "Data Center Hardware",
        content: include_str!("../articles/server.md"),
        tags: &["Server", "Hardware", "CPU", "RAM", "Disk", "PSU", "Data Center"],
    },
    ArticleSeed {
        qr_code_id: "UPS",
        title: "UPS and Power Distribution Troubleshooting",
        stack: "Power Systems",
        category: "Data Center Infrastructure",
        content: include_str!("../articles/ups.md"),
        tags: &[
            "UPS",
            "Power Distribution",
            "PDU",
            "Battery",
            "Electrical",
            "Data Center",
            "Backup Power",
        ],
    },
];

fn builtin_articles() -> Vec<TroubleshootingArticle> {
    // 目录修订日期
    let last_updated = Utc
        .with_ymd_and_hms(2025, 11, 3, 0, 0, 0)
        .single()
        .unwrap_or_default();
    SEEDS
        .iter()
        .map(|seed| TroubleshootingArticle {
            id: article_id(seed.qr_code_id),
            title: seed.title.to_string(),
            stack: seed.stack.to_string(),
            category: seed.category.to_string(),
            content: seed.content.to_string(),
            tags: seed.tags.iter().map(|tag| tag.to_string()).collect(),
            last_updated,
            qr_code_id: seed.qr_code_id.to_string(),
        })
        .collect()
}
