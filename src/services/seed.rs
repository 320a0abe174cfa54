use crate::error::AppResult;
use crate::models::{category, user, Category, User};
use crate::utils::hash_password;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter};
use std::env;

#[derive(Debug, Clone)]
pub struct BootstrapAdminConfig {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

impl BootstrapAdminConfig {
    pub fn from_env() -> Option<Self> {
        let enabled = env::var("BOOTSTRAP_ADMIN_ENABLED")
            .ok()
            .map(|v| v.trim().to_ascii_lowercase())
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes" | "y" | "on"))
            .unwrap_or(false);

        if !enabled {
            return None;
        }

        Some(Self {
            email: env::var("BOOTSTRAP_ADMIN_EMAIL").ok()?,
            password: env::var("BOOTSTRAP_ADMIN_PASSWORD").ok()?,
            name: env::var("BOOTSTRAP_ADMIN_NAME").ok(),
        })
    }
}

/// Ensure an admin account exists at startup:
/// - if any admin is already present, do nothing
/// - else if the configured email exists, promote that account
/// - else create a new active admin
pub async fn ensure_bootstrap_admin(db: &DatabaseConnection) -> AppResult<()> {
    let Some(cfg) = BootstrapAdminConfig::from_env() else {
        return Ok(());
    };

    let admin_exists = User::find()
        .filter(user::Column::Role.eq(user::ROLE_ADMIN))
        .one(db)
        .await?
        .is_some();
    if admin_exists {
        return Ok(());
    }

    let existing = User::find()
        .filter(user::Column::Email.eq(cfg.email.clone()))
        .one(db)
        .await?;

    let now = chrono::Utc::now().naive_utc();

    if let Some(user) = existing {
        let mut active: user::ActiveModel = user.into();
        active.role = sea_orm::ActiveValue::Set(user::ROLE_ADMIN.to_string());
        active.update(db).await?;
        return Ok(());
    }

    let password_hash = hash_password(&cfg.password)?;

    let new_user = user::ActiveModel {
        email: sea_orm::ActiveValue::Set(cfg.email),
        password_hash: sea_orm::ActiveValue::Set(password_hash),
        name: sea_orm::ActiveValue::Set(cfg.name),
        phone_number: sea_orm::ActiveValue::Set(None),
        address: sea_orm::ActiveValue::Set(None),
        avatar_url: sea_orm::ActiveValue::Set(None),
        is_active: sea_orm::ActiveValue::Set(true),
        role: sea_orm::ActiveValue::Set(user::ROLE_ADMIN.to_string()),
        created_at: sea_orm::ActiveValue::Set(now),
        last_login_at: sea_orm::ActiveValue::Set(None),
        ..Default::default()
    };

    new_user.insert(db).await?;
    tracing::info!("Bootstrap admin account created");
    Ok(())
}

struct SeedCategory {
    slug: &'static str,
    name_ko: &'static str,
    name_en: &'static str,
    name_ja: &'static str,
    description_ko: &'static str,
    description_en: &'static str,
    description_ja: &'static str,
    icon: &'static str,
    color: &'static str,
    sort_order: i32,
}

const SEED_CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        slug: "tutorials",
        name_ko: "튜토리얼",
        name_en: "Tutorials",
        name_ja: "チュートリアル",
        description_ko: "단계별 학습 가이드와 실전 예제",
        description_en: "Step-by-step learning guides and practical examples",
        description_ja: "ステップバイステップの学習ガイドと実践例",
        icon: "📚",
        color: "#3B82F6",
        sort_order: 1,
    },
    SeedCategory {
        slug: "git",
        name_ko: "Git 사용법",
        name_en: "Git Usage",
        name_ja: "Git使用方法",
        description_ko: "Git 버전 관리 시스템 활용법과 협업 워크플로우",
        description_en: "Git version control system usage and collaboration workflows",
        description_ja: "Gitバージョン管理システムの活用法とコラボレーションワークフロー",
        icon: "🔀",
        color: "#F05032",
        sort_order: 2,
    },
    SeedCategory {
        slug: "web-security",
        name_ko: "웹 보안",
        name_en: "Web Security",
        name_ja: "Webセキュリティ",
        description_ko: "웹 애플리케이션 보안 취약점 분석 및 대응 방법",
        description_en: "Web application security vulnerabilities analysis and countermeasures",
        description_ja: "Webアプリケーションのセキュリティ脆弱性分析と対策",
        icon: "🔒",
        color: "#EF4444",
        sort_order: 3,
    },
    SeedCategory {
        slug: "azure",
        name_ko: "Azure",
        name_en: "Azure",
        name_ja: "Azure",
        description_ko: "Microsoft Azure 클라우드 서비스 활용 가이드",
        description_en: "Microsoft Azure cloud services usage guide",
        description_ja: "Microsoft Azureクラウドサービス活用ガイド",
        icon: "☁️",
        color: "#0078D4",
        sort_order: 4,
    },
    SeedCategory {
        slug: "aws",
        name_ko: "AWS",
        name_en: "AWS",
        name_ja: "AWS",
        description_ko: "Amazon Web Services 클라우드 인프라 구축 및 운영",
        description_en: "Amazon Web Services cloud infrastructure setup and operations",
        description_ja: "Amazon Web Servicesクラウドインフラの構築と運用",
        icon: "🛠️",
        color: "#FF9900",
        sort_order: 5,
    },
];

/// Seed the marketing categories when `SEED_DEMO_DATA` is enabled and the
/// categories table is still empty.
pub async fn seed_demo_categories(db: &DatabaseConnection) -> AppResult<()> {
    let enabled = env::var("SEED_DEMO_DATA")
        .ok()
        .map(|v| v.trim().to_ascii_lowercase())
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes" | "y" | "on"))
        .unwrap_or(false);
    if !enabled {
        return Ok(());
    }

    let existing = Category::find().count(db).await?;
    if existing > 0 {
        return Ok(());
    }

    let now = chrono::Utc::now().naive_utc();
    for seed in SEED_CATEGORIES {
        let model = category::ActiveModel {
            slug: sea_orm::ActiveValue::Set(seed.slug.to_string()),
            name_ko: sea_orm::ActiveValue::Set(seed.name_ko.to_string()),
            name_en: sea_orm::ActiveValue::Set(seed.name_en.to_string()),
            name_ja: sea_orm::ActiveValue::Set(seed.name_ja.to_string()),
            description_ko: sea_orm::ActiveValue::Set(Some(seed.description_ko.to_string())),
            description_en: sea_orm::ActiveValue::Set(Some(seed.description_en.to_string())),
            description_ja: sea_orm::ActiveValue::Set(Some(seed.description_ja.to_string())),
            icon: sea_orm::ActiveValue::Set(Some(seed.icon.to_string())),
            color: sea_orm::ActiveValue::Set(Some(seed.color.to_string())),
            sort_order: sea_orm::ActiveValue::Set(seed.sort_order),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };
        model.insert(db).await?;
    }

    tracing::info!("Seeded {} demo categories", SEED_CATEGORIES.len());
    Ok(())
}
