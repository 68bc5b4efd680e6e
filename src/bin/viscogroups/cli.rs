use std::path::PathBuf;

use clap::Parser;

use viscogroups::PartialSettings;

#[derive(Parser)]
#[command(
    name = "viscogroups",
    about = "Assign viscosity group-contribution codes to a molecule",
    version
)]
pub struct Cli {
    /// SMILES string or CAS registry number (e.g. 64-17-5)
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Group coefficient table (CSV: Q, Group, ai, bi, ci, di)
    #[arg(short, long, value_name = "FILE")]
    pub table: Option<PathBuf>,

    /// CAS to SMILES alias table (CSV: cas, smiles)
    #[arg(short, long, value_name = "FILE")]
    pub aliases: Option<PathBuf>,

    /// Look up CAS numbers missing from the alias table online (NCI resolver)
    #[arg(long)]
    pub online: bool,

    /// Settings file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Merge rings that share a single atom into one ring system
    #[arg(long)]
    pub spiro: bool,

    /// Log every rule application
    #[arg(short, long, conflicts_with = "quiet")]
    pub debug: bool,

    /// Suppress warnings
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Settings given on the command line; unset flags leave file values alone.
    pub fn overrides(&self) -> PartialSettings {
        PartialSettings {
            group_table: self.table.clone(),
            aliases: self.aliases.clone(),
            online: self.online.then_some(true),
            include_spiro: self.spiro.then_some(true),
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_become_overrides() {
        let args = ["viscogroups", "CCO", "--table", "t.csv", "--spiro"];
        let o = Cli::try_parse_from(args).unwrap().overrides();
        assert_eq!(o.group_table, Some(PathBuf::from("t.csv")));
        assert_eq!(o.aliases, None);
        assert_eq!(o.online, None);
        assert_eq!(o.include_spiro, Some(true));
    }

    #[test]
    fn online_flag_turns_on_network_lookup() {
        let o = Cli::try_parse_from(["viscogroups", "64-17-5", "--online"])
            .unwrap()
            .overrides();
        assert_eq!(o.online, Some(true));
    }

    #[test]
    fn debug_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["viscogroups", "C", "--debug", "--quiet"]).is_err());
    }
}
