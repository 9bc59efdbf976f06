pub mod answer_cache;
pub mod category;
pub mod product;
pub mod quiz;
pub mod serde_ext;

pub use answer_cache::{AnswerCache, QuestionAnswers};
pub use category::{Category, FlatCategory, TaxonomyResponse};
pub use product::{Product, ProductRow, SearchPage, SearchQuery};
pub use quiz::{
    Answer, AnswerResult, AnswerSubmission, FeedStructure, FinishModule, ModuleProgress, Question,
    QuizInfo,
};
