pub mod leads;
pub mod pipeline;

pub use leads::{HotLeadAdvice, LeadSummary};
pub use pipeline::{PipelineNote, PipelineSummary};
