use uuid::Uuid;

/// An uploaded photo waiting to be classified.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub request_id: Uuid,
    pub image: Vec<u8>,
}

impl AnalyzeRequest {
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            image,
        }
    }
}
