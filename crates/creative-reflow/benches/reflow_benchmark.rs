//! Reflow benchmarks.

use creative_layout::{build_layout, LayoutOptions, LayoutTree};
use creative_reflow::ReflowEngine;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use indexmap::IndexMap;
use serde_json::{json, Value};

fn banner() -> LayoutTree {
    let designs: IndexMap<String, Value> = serde_json::from_value(json!({
        "banner": {
            "width": 300, "height": 250, "backgroundColor": "#ffffff",
            "logo": { "x": 10, "y": 10, "width": 80, "height": 40 },
            "headline": { "defaultValue": "Summer collection", "fontSize": 22, "gravity": "north", "y": 60 },
            "product": { "publicId": "p/1", "isMainProduct": true, "gravity": "center", "width": 120, "height": 120 },
            "price": { "defaultValue": "$49.99", "fontSize": 18, "gravity": "south_west", "x": 10, "y": 40 },
            "tagline": { "defaultValue": "Free shipping on all orders", "fontSize": 10, "gravity": "south", "y": 10 },
            "cta": { "defaultValue": "SHOP NOW", "fontSize": 16, "bold": true, "gravity": "south_east", "x": 10, "y": 10 }
        }
    }))
    .unwrap();
    build_layout(&designs, "banner", &LayoutOptions::default()).unwrap()
}

fn reflow_leaderboard(c: &mut Criterion) {
    let tree = banner();
    let engine = ReflowEngine::default();
    c.bench_function("reflow_leaderboard", |b| {
        b.iter(|| engine.reflow(black_box(&tree), 728.0, 90.0))
    });
}

fn reflow_skyscraper(c: &mut Criterion) {
    let tree = banner();
    let engine = ReflowEngine::default();
    c.bench_function("reflow_skyscraper", |b| {
        b.iter(|| engine.reflow(black_box(&tree), 160.0, 600.0))
    });
}

criterion_group!(benches, reflow_leaderboard, reflow_skyscraper);
criterion_main!(benches);
