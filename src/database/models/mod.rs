pub mod definition;
pub mod score;
pub mod subject;
pub mod user;

pub use definition::{BehaviorDefinition, DefinitionAverage};
pub use score::{BehaviorScore, ScoreWithDefinition};
pub use subject::{Subject, SubjectWithDefinitions};
pub use user::{User, UserProfile};
