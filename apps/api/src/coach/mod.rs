// Job coach chat: one conversational reply per message, grounded in the user's
// skills and current job list only when the message is more than a greeting.

pub mod chat;
pub mod handlers;
pub mod prompts;
