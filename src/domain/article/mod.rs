pub mod entity;
pub mod repository;
pub mod value_objects;
pub mod version;

pub use entity::{Approval, Article, ArticleStatus, NewArticle};
pub use repository::{ArticleReadRepository, ArticleVersionRepository, ArticleWriteRepository};
pub use value_objects::{ArticleId, ArticleSlug, ArticleTitle};
pub use version::{ArticleVersion, ContentId, ContentSnapshot, NewArticleVersion, VersionKind};
