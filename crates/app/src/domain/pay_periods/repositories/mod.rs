//! Pay Period Repositories

mod events;
mod periods;
mod runs;

pub(crate) use events::PgPayEventsRepository;
pub(crate) use periods::PgPayPeriodsRepository;
pub(crate) use runs::PgPayRunsRepository;
