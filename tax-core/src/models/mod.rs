mod estimate;
mod filing_status;
mod net_income;
mod pay_frequency;

pub use estimate::{EstimateRequest, EstimateResponse, FederalDetail, StateDetail};
pub use filing_status::FilingStatus;
pub use net_income::NetIncomeEntry;
pub use pay_frequency::PayFrequency;
