//! Time Series Clustering Example
//!
//! This example demonstrates how to cluster time series using banded
//! Dynamic Time Warping (DTW) and DTW k-means.
//!
//! Run with: cargo run --example time_series_clustering

use anofox_cluster::clustering::{
    dtw_distance, dtw_pairwise, elbow_inertias, CostMetric, DbaAggregator, Dtw, DtwKMeans,
    DtwKMeansConfig, WindowBound, DEFAULT_PATIENCE,
};
use anofox_cluster::core::Sequence;
use anofox_cluster::Result;
use tracing::Level;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    println!("=== Time Series Clustering Example ===\n");

    // =========================================================================
    // Dynamic Time Warping Distance
    // =========================================================================
    println!("--- Dynamic Time Warping (DTW) Distance ---\n");

    let series_a = vec![1.0, 2.0, 3.0, 2.0, 1.0];
    let series_b = vec![1.0, 2.0, 3.0, 2.0, 1.0];
    let series_c = vec![0.5, 1.0, 2.0, 3.0, 2.0, 1.0, 0.5];

    println!("Series A: {:?}", series_a);
    println!("Series B: {:?}", series_b);
    println!("Series C: {:?} (shifted version)", series_c);
    println!();

    println!("DTW distances (window 2):");
    println!(
        "  dtw(A, B) = {:.4} (identical)",
        dtw_distance(&series_a, &series_b, 2, CostMetric::Euclidean)
    );
    println!(
        "  dtw(A, C) = {:.4} (different lengths)",
        dtw_distance(&series_a, &series_c, 2, CostMetric::Euclidean)
    );
    println!(
        "  cosine dtw(A, -A) = {:.4}",
        dtw_distance(
            &series_a,
            &series_a.iter().map(|v| -v).collect::<Vec<_>>(),
            2,
            CostMetric::Cosine
        )
    );

    // =========================================================================
    // Band edge
    // =========================================================================
    println!("\n--- Band Edge ---\n");

    let s1 = vec![6.0, 3.0, 1.0, 7.0];
    let s2 = vec![0.0, 6.0, 6.0, 9.0];
    let exclusive = Dtw::new(2, CostMetric::Euclidean)?;
    let inclusive = exclusive.with_bound(WindowBound::Inclusive);

    println!("Series 1: {:?}", s1);
    println!("Series 2: {:?}", s2);
    println!(
        "Exclusive edge: d(1,2) = {:.1}, d(2,1) = {:.1}",
        exclusive.distance(&s1, &s2),
        exclusive.distance(&s2, &s1)
    );
    println!(
        "Inclusive edge: d(1,2) = {:.1}, d(2,1) = {:.1}",
        inclusive.distance(&s1, &s2),
        inclusive.distance(&s2, &s1)
    );

    // =========================================================================
    // DTW Alignment Path
    // =========================================================================
    println!("\n--- DTW Alignment Path ---\n");

    let short_a = vec![1.0, 2.0, 3.0];
    let short_b = vec![1.0, 1.5, 2.0, 2.5, 3.0];
    let alignment = inclusive.align(&short_a, &short_b);

    println!("Series A: {:?}", short_a);
    println!("Series B: {:?}", short_b);
    println!("Cost: {:.4}", alignment.cost());
    println!("\nAlignment path (i, j) pairs:");
    for (i, j) in alignment.path() {
        println!("  A[{}]={:.1} <-> B[{}]={:.1}", i, short_a[i], j, short_b[j]);
    }

    // =========================================================================
    // Pairwise Distance Matrix
    // =========================================================================
    println!("\n--- Pairwise Distance Matrix ---\n");

    let collection = Sequence::batch(vec![
        vec![1.0, 2.0, 1.0, 2.0, 1.0],
        vec![1.1, 2.1, 1.1, 2.1, 1.1],
        vec![5.0, 6.0, 5.0, 6.0, 5.0],
        vec![5.1, 6.1, 5.1, 6.1, 5.1],
    ])?;
    let dist_matrix = dtw_pairwise(&collection, &inclusive);

    print!("      ");
    for i in 0..dist_matrix.len() {
        print!("  S{}   ", i);
    }
    println!();
    for (i, row) in dist_matrix.iter().enumerate() {
        print!("S{}  ", i);
        for &d in row {
            print!("{:6.2} ", d);
        }
        println!();
    }

    // =========================================================================
    // DTW K-Means
    // =========================================================================
    println!("\n--- DTW K-Means ---\n");

    let cluster_data = Sequence::batch(vec![
        // Cluster 1: Low oscillating
        vec![1.0, 2.0, 1.0, 2.0, 1.0],
        vec![1.2, 2.2, 1.2, 2.2, 1.2],
        vec![0.8, 1.8, 0.8, 1.8, 0.8],
        vec![1.1, 2.1, 1.1, 2.1, 1.1],
        // Cluster 2: High oscillating
        vec![10.0, 11.0, 10.0, 11.0, 10.0],
        vec![10.2, 11.2, 10.2, 11.2, 10.2],
        vec![9.8, 10.8, 9.8, 10.8, 9.8],
        vec![10.1, 11.1, 10.1, 11.1, 10.1],
        // Cluster 3: Trending up
        vec![1.0, 2.0, 3.0, 4.0, 5.0],
        vec![1.1, 2.1, 3.1, 4.1, 5.1],
        vec![0.9, 1.9, 2.9, 3.9, 4.9],
        vec![1.0, 2.0, 3.0, 4.0, 5.0],
    ])?;

    let config = DtwKMeansConfig::new(3)
        .num_iter(20)
        .num_init(10)
        .window(2)
        .bound(WindowBound::Inclusive)
        .seed(42);
    let mut model = DtwKMeans::new(config.clone())?;
    model.fit(&cluster_data, DEFAULT_PATIENCE)?;

    if let Some(fitted) = model.fitted() {
        println!("Best restart:  {}", fitted.best_run);
        println!("Iterations:    {} ({:?})", fitted.n_iter, fitted.stop);
        println!("Inertia:       {:.4}", fitted.inertia);
        println!("Cluster sizes: {:?}", fitted.labels.cluster_sizes());

        println!("\nCluster members:");
        for (cluster, members) in fitted.labels.iter() {
            println!("  Cluster {}: {:?}", cluster, members);
        }

        println!("\nCluster centroids:");
        for (i, centroid) in fitted.cluster_centers.iter().enumerate() {
            let preview: Vec<String> = centroid.values().iter().map(|v| format!("{:.2}", v)).collect();
            println!("  Cluster {}: [{}]", i, preview.join(", "));
        }
    }

    // =========================================================================
    // Prediction
    // =========================================================================
    println!("\n--- Prediction ---\n");

    let new = Sequence::batch(vec![
        vec![1.05, 2.05, 1.05, 2.05, 1.05],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    ])?;
    for (cluster, members) in model.predict(&new)?.into_map() {
        println!("  Cluster {}: {:?}", cluster, members);
    }

    // =========================================================================
    // DTW Barycenter Averaging
    // =========================================================================
    println!("\n--- DTW Barycenter Averaging ---\n");

    let dba = DbaAggregator::new(*model.dtw()).with_max_iter(5);
    let mut dba_model = DtwKMeans::new(config.clone())?.with_aggregator(dba);
    dba_model.fit(&cluster_data, DEFAULT_PATIENCE)?;
    if let Some(fitted) = dba_model.fitted() {
        println!("Inertia:       {:.4}", fitted.inertia);
        println!("Cluster sizes: {:?}", fitted.labels.cluster_sizes());
    }

    // =========================================================================
    // Elbow Method for Optimal K
    // =========================================================================
    println!("\n--- Elbow Method (Optimal K Selection) ---\n");

    let inertias = elbow_inertias(&cluster_data, 6, &config, DEFAULT_PATIENCE)?;

    println!("{:>3} {:>12}", "K", "Inertia");
    println!("{}", "-".repeat(17));
    for (k, &inertia) in inertias.iter().enumerate() {
        println!("{:>3} {:>12.2}", k + 1, inertia);
    }

    Ok(())
}
