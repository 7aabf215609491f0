// Outreach: turn a job listing URL into a cold email for the stored profile.
// Implements: page → jobs → draft pipeline, subject/body split, closing check, send links.
// All LLM calls go through the chain module — no direct provider calls here.

pub mod draft;
pub mod handlers;
pub mod links;
pub mod pipeline;
