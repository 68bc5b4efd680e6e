use criterion::{black_box, criterion_group, criterion_main, Criterion};

use viscogroups::{Classifier, ClassifierConfig, SmilesMolecule};

const HEXANE: &str = "CCCCCC";
const TOLUENE: &str = "Cc1ccccc1";
const TERPHENYL: &str = "c1ccc(cc1)-c2ccc(cc2)-c3ccccc3";
const STEROID: &str = "CC12CCC3C(CCC4=CC(=O)CCC34C)C1CCC2O";
const WAX_ESTER: &str = "CCCCCCCCCCCCCCCCOC(=O)CCCCCCCCCCCCCCC";

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (name, smiles) in [
        ("hexane", HEXANE),
        ("toluene", TOLUENE),
        ("terphenyl", TERPHENYL),
        ("steroid", STEROID),
        ("wax_ester", WAX_ESTER),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(SmilesMolecule::parse(black_box(smiles)).unwrap()))
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let classifier = Classifier::standard(ClassifierConfig::default()).unwrap();
    let mut group = c.benchmark_group("classify");

    for (name, smiles) in [
        ("hexane", HEXANE),
        ("toluene", TOLUENE),
        ("terphenyl", TERPHENYL),
        ("steroid", STEROID),
        ("wax_ester", WAX_ESTER),
    ] {
        let mol = SmilesMolecule::parse(smiles).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(classifier.classify(black_box(&mol))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_classify);
criterion_main!(benches);
