use criterion::{black_box, criterion_group, criterion_main, Criterion};

use phenolr::annotations::{AnnotatedTerm, DiseaseAnnotations, DiseaseCorpus, Frequency};
use phenolr::{BackgroundIndex, FrequencyEstimator, Ontology};

/// A balanced tree: one root, `width` branches, each with `width`
/// children, each with `width` leaves
fn build_ontology(width: u32) -> Ontology {
    let mut ontology = Ontology::default();
    ontology.insert_term("Root", 1u32);
    let mut next_id = 2u32;
    for _ in 0..width {
        let branch = next_id;
        next_id += 1;
        ontology.insert_term("Branch", branch);
        ontology.add_parent(1u32, branch);
        for _ in 0..width {
            let mid = next_id;
            next_id += 1;
            ontology.insert_term("Mid", mid);
            ontology.add_parent(branch, mid);
            for _ in 0..width {
                let leaf = next_id;
                next_id += 1;
                ontology.insert_term("Leaf", leaf);
                ontology.add_parent(mid, leaf);
            }
        }
    }
    ontology.create_cache();
    ontology
}

fn build_corpus(ontology: &Ontology, n_diseases: u32) -> DiseaseCorpus {
    let n_terms = ontology.len() as u32;
    let mut corpus = DiseaseCorpus::new();
    for disease_id in 0..n_diseases {
        let mut disease = DiseaseAnnotations::new(disease_id.into(), "Synthetic");
        for offset in 0..5u32 {
            let term = 2 + (disease_id * 7 + offset * 13) % (n_terms - 1);
            disease.add_annotation(AnnotatedTerm::new(
                term.into(),
                Frequency::try_from(0.5).unwrap(),
            ));
        }
        corpus.insert(disease);
    }
    corpus
}

fn criterion_benchmark(c: &mut Criterion) {
    let ontology = build_ontology(10);
    let corpus = build_corpus(&ontology, 100);

    c.bench_function("background index", |b| {
        b.iter(|| BackgroundIndex::build(black_box(&ontology), black_box(&corpus)))
    });

    let estimator = FrequencyEstimator::new(&ontology, &corpus);
    let disease_id = 0u32.into();
    let first = *corpus
        .record_for(&disease_id)
        .unwrap()
        .annotations()
        .next()
        .unwrap()
        .term_id();

    c.bench_function("identical tier", |b| {
        b.iter(|| estimator.estimate_frequency(black_box(first), black_box(&disease_id)))
    });

    // the last leaf is most likely unrelated to the first disease,
    // forcing the full walk through all tiers
    let last_leaf = (ontology.len() as u32).into();
    c.bench_function("backoff tiers", |b| {
        b.iter(|| estimator.estimate_frequency(black_box(last_leaf), black_box(&disease_id)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
