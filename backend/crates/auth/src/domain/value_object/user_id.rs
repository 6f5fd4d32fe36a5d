use kernel::id::{PublicId, SurrogateId, markers};

/// Internal key; also the JWT subject and the product creator reference
pub type UserId = SurrogateId<markers::User>;

/// UUID exposed in URLs and payloads
pub type UserPublicId = PublicId<markers::User>;
