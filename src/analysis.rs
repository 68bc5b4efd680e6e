use tracing::{info, instrument};

use crate::config::Settings;
use crate::engine::{Classification, Classifier};
use crate::error::{Error, Result};
use crate::identifier::{
    ChainResolver, CirResolver, Identifier, NoResolver, Resolver, TableResolver,
};
use crate::lookup::{GroupTable, ResolvedGroup};
use crate::molecule::SmilesMolecule;

/// Everything one run produced for one input.
#[derive(Debug, Clone)]
pub struct Report {
    pub input: String,
    pub smiles: String,
    pub classification: Classification,
    pub groups: Vec<ResolvedGroup>,
}

impl Report {
    pub fn unresolved(&self) -> impl Iterator<Item = &ResolvedGroup> {
        self.groups.iter().filter(|g| !g.is_resolved())
    }
}

/// Identifier resolution, parsing, classification and table lookup.
pub struct Analyzer {
    classifier: Classifier,
    resolver: Box<dyn Resolver + Send + Sync>,
    table: GroupTable,
}

impl Analyzer {
    pub fn new(
        classifier: Classifier,
        resolver: Box<dyn Resolver + Send + Sync>,
        table: GroupTable,
    ) -> Self {
        Self {
            classifier,
            resolver,
            table,
        }
    }

    /// Loads the group table and alias table named in `settings`. CAS
    /// numbers go to the alias table first, then to the online resolver
    /// when `settings.online` is set.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let table = GroupTable::from_path(&settings.group_table)?;
        let mut chain = ChainResolver::default();
        if let Some(path) = &settings.aliases {
            chain.push(TableResolver::from_path(path)?);
        }
        if settings.online {
            chain.push(CirResolver::new()?);
        }
        let resolver: Box<dyn Resolver + Send + Sync> = if chain.is_empty() {
            Box::new(NoResolver)
        } else {
            Box::new(chain)
        };
        let classifier = Classifier::standard(settings.classifier_config())?;
        Ok(Self::new(classifier, resolver, table))
    }

    pub fn table(&self) -> &GroupTable {
        &self.table
    }

    #[instrument(level = "info", skip(self))]
    pub fn analyze(&self, input: &str) -> Result<Report> {
        let smiles = match Identifier::parse(input)? {
            Identifier::Cas(cas) => self.resolver.resolve(&cas)?,
            Identifier::Smiles(smiles) => smiles,
        };
        let molecule = SmilesMolecule::parse(&smiles).map_err(|source| Error::Parse {
            input: smiles.clone(),
            source,
        })?;
        let classification = self.classifier.classify(&molecule);
        let groups = self.table.resolve_all(&classification.codes);
        info!(
            %smiles,
            codes = classification.codes.len(),
            unresolved = groups.iter().filter(|g| !g.is_resolved()).count(),
            unclassified = classification.unclassified.len(),
            "analysis complete"
        );
        Ok(Report {
            input: input.to_string(),
            smiles,
            classification,
            groups,
        })
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("classifier", &self.classifier)
            .field("table_rows", &self.table.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::GroupCode;
    use crate::engine::ClassifierConfig;
    use crate::identifier::ResolutionError;
    use crate::lookup::GroupEntry;

    fn entry(q: u16, group: &str) -> GroupEntry {
        GroupEntry {
            q: GroupCode(q),
            group: group.to_string(),
            ai: 1.0,
            bi: 2.0,
            ci: 3.0,
            di: 4.0,
        }
    }

    fn analyzer() -> Analyzer {
        let table = GroupTable::from_entries([entry(2, "CH3"), entry(3, "CH2")]);
        let aliases = "cas,smiles\n64-17-5,CCO\n";
        Analyzer::new(
            Classifier::standard(ClassifierConfig::default()).unwrap(),
            Box::new(TableResolver::from_reader(aliases.as_bytes(), "aliases").unwrap()),
            table,
        )
    }

    #[test]
    fn smiles_input_runs_end_to_end() {
        let report = analyzer().analyze("CCC").unwrap();
        assert_eq!(report.smiles, "CCC");
        assert_eq!(report.classification.code_values(), vec![2, 3, 2]);
        assert!(report.groups.iter().all(ResolvedGroup::is_resolved));
    }

    #[test]
    fn cas_input_is_resolved_first() {
        let report = analyzer().analyze("64-17-5").unwrap();
        assert_eq!(report.smiles, "CCO");
        assert_eq!(report.classification.code_values(), vec![2, 3]);
    }

    #[test]
    fn missing_codes_do_not_fail_the_run() {
        let report = analyzer().analyze("C=C").unwrap();
        assert_eq!(report.unresolved().count(), 2);
    }

    #[test]
    fn parse_failure_is_fatal() {
        assert!(matches!(analyzer().analyze("C1CC"), Err(Error::Parse { .. })));
    }

    #[test]
    fn unknown_cas_is_fatal() {
        assert!(matches!(
            analyzer().analyze("71-43-2"),
            Err(Error::Resolution(_))
        ));
    }

    #[test]
    fn settings_without_aliases_or_online_refuse_cas_input() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("groups.csv");
        std::fs::write(&table, "Q,Group,ai,bi,ci,di\n2,CH3,1,2,3,4\n").unwrap();
        let settings = Settings {
            group_table: table,
            ..Settings::default()
        };
        let analyzer = Analyzer::from_settings(&settings).unwrap();
        assert!(matches!(
            analyzer.analyze("64-17-5"),
            Err(Error::Resolution(ResolutionError::NoResolver(_)))
        ));
        assert_eq!(analyzer.analyze("CC").unwrap().classification.code_values(), vec![2, 2]);
    }
}
