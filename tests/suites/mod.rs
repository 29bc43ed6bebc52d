mod content;
mod pipeline;
mod producer;
