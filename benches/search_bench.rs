//! Query and link-resolution throughput over a synthetic namespace.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gir_xref::search::QueryEngine;
use gir_xref::{LinkResolver, Namespace, Symbol, SymbolKind, SymbolTable, build_index};
use std::hint::black_box;
use std::sync::Arc;

/// `types` classes, each with a handful of methods, properties and signals.
fn synthetic_table(types: usize) -> SymbolTable {
    let mut table = SymbolTable::new(Namespace::new("Gtk", "4.0").with_prefixes("Gtk", "gtk"));
    let ns = table.primary();
    for t in 0..types {
        let type_name = format!("Widget{t}");
        let snake = format!("widget{t}");
        table
            .register(
                Symbol::new(ns, SymbolKind::Class, &type_name)
                    .with_c_type(format!("Gtk{type_name}"))
                    .with_doc(format!("A widget numbered {t}. See [class@Widget0].")),
            )
            .expect("unique class");
        for method in ["show", "hide", "queue_draw", "get_parent", "set_visible"] {
            table
                .register(
                    Symbol::new(ns, SymbolKind::Method, method)
                        .with_type_name(&type_name)
                        .with_c_identifier(format!("gtk_{snake}_{method}")),
                )
                .expect("unique method");
        }
        for property in ["visible", "sensitive"] {
            table
                .register(
                    Symbol::new(ns, SymbolKind::Property, property).with_type_name(&type_name),
                )
                .expect("unique property");
        }
        table
            .register(Symbol::new(ns, SymbolKind::Signal, "destroy").with_type_name(&type_name))
            .expect("unique signal");
    }
    table
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for types in [100, 1_000] {
        let index = build_index(&synthetic_table(types));
        let engine = QueryEngine::new(Arc::new(index));
        group.throughput(Throughput::Elements(engine.index().len() as u64));

        for query in ["show", "widget42visible", "signal:destroy"] {
            group.bench_with_input(
                BenchmarkId::new(query, types),
                &engine,
                |b, engine| b.iter(|| black_box(engine.search(black_box(query)))),
            );
        }
    }

    group.finish();
}

fn bench_links(c: &mut Criterion) {
    let table = synthetic_table(500);
    let resolver = LinkResolver::new(&table);
    let document: String = (0..200)
        .map(|i| {
            format!(
                "Call [method@Widget{i}.show] then read [property@Widget{i}:visible] or [class@Missing{i}].\n"
            )
        })
        .collect();

    c.bench_function("resolve_links_200_lines", |b| {
        b.iter(|| black_box(resolver.resolve_links(black_box(&document), table.primary())))
    });
}

criterion_group!(benches, bench_search, bench_links);
criterion_main!(benches);
