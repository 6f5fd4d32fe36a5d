use kernel::id::{PublicId, SurrogateId, markers};

pub type ProductId = SurrogateId<markers::Product>;

/// UUID exposed in URLs and payloads
pub type ProductPublicId = PublicId<markers::Product>;
