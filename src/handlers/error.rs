use crate::domain::RuleViolation;

#[derive(thiserror::Error, Debug)]
pub enum SubscriptionError {
    #[error("O meetup não foi encontrado")]
    MeetupNotFound,
    #[error("Usuário não encontrado")]
    UserNotFound,
    #[error(transparent)]
    Rejected(#[from] RuleViolation),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
