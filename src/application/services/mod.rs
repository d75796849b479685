mod answer_service;

pub use answer_service::{
    AnswerError, AnswerService, GENERATION_FAILED_ANSWER, IndexedDocument, NOT_PROCESSED_ANSWER,
    RetrievalOptions,
};
