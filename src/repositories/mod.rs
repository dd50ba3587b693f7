pub(crate) mod population;
pub(crate) mod report;

pub(crate) use population::PopulationRepository;
pub(crate) use report::{ReportRepository, ReportRow};
