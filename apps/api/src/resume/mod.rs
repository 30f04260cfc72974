// Resume upload: text extraction used to personalize interview questions.

pub mod handlers;
pub mod parser;
