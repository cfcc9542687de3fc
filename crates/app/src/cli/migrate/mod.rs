use clap::{Args, Subcommand, ValueEnum};
use tally::entities::EntityKind;

use super::StoreArgs;

mod clear;
mod run;
mod status;

#[derive(Debug, Args)]
pub(crate) struct MigrateCommand {
    #[command(subcommand)]
    command: MigrateSubcommand,
}

#[derive(Debug, Subcommand)]
enum MigrateSubcommand {
    /// Compare local and remote record counts
    Status(StoreArgs),

    /// Copy local records into the remote store
    Run(run::RunArgs),

    /// Remove local buckets
    Clear(clear::ClearArgs),
}

/// Entity kind selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Entity {
    Customers,
    Products,
    Appointments,
    Finance,
}

impl From<Entity> for EntityKind {
    fn from(entity: Entity) -> Self {
        match entity {
            Entity::Customers => Self::Customer,
            Entity::Products => Self::Product,
            Entity::Appointments => Self::Appointment,
            Entity::Finance => Self::Finance,
        }
    }
}

/// Selected kinds in migration order, or every kind when none are selected.
pub(crate) fn selected_kinds(entities: &[Entity]) -> Vec<EntityKind> {
    EntityKind::MIGRATION_ORDER
        .into_iter()
        .filter(|kind| {
            entities.is_empty()
                || entities
                    .iter()
                    .any(|entity| EntityKind::from(*entity) == *kind)
        })
        .collect()
}

pub(crate) async fn run(command: MigrateCommand) -> Result<(), String> {
    match command.command {
        MigrateSubcommand::Status(args) => status::run(args).await,
        MigrateSubcommand::Run(args) => run::run(args).await,
        MigrateSubcommand::Clear(args) => clear::run(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_selection_means_every_kind() {
        assert_eq!(selected_kinds(&[]), EntityKind::MIGRATION_ORDER.to_vec());
    }

    #[test]
    fn selection_keeps_migration_order() {
        assert_eq!(
            selected_kinds(&[Entity::Finance, Entity::Customers]),
            vec![EntityKind::Customer, EntityKind::Finance]
        );
    }
}
