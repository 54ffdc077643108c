use bevy::prelude::*;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Aggregate labour market. Workers are a scalar share of the population.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct LabourStats {
    pub population: f32,
    pub job_capacity: f32,
    pub workers: f32,
    pub employed: f32,
    pub unemployed: f32,
    /// 0 when there are no workers.
    pub unemployment_rate: f32,
    /// 1 when there are no jobs.
    pub vacancy_rate: f32,
}

pub fn compute_labour_stats(population: f32, job_capacity: f32, worker_share: f32) -> LabourStats {
    let population = population.max(0.0);
    let job_capacity = job_capacity.max(0.0);
    let workers = population * worker_share.max(0.0);
    let employed = workers.min(job_capacity);
    let unemployed = (workers - job_capacity).max(0.0);
    let unemployment_rate = if workers > 0.0 {
        unemployed / workers
    } else {
        0.0
    };
    let vacancy_rate = if job_capacity > 0.0 {
        (job_capacity - employed).max(0.0) / job_capacity
    } else {
        1.0
    };
    LabourStats {
        population,
        job_capacity,
        workers,
        employed,
        unemployed,
        unemployment_rate,
        vacancy_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_jobs_means_full_unemployment_and_vacancy() {
        let stats = compute_labour_stats(100.0, 0.0, 0.55);
        assert_eq!(stats.workers, 55.0);
        assert_eq!(stats.unemployment_rate, 1.0);
        assert_eq!(stats.vacancy_rate, 1.0);
    }

    #[test]
    fn test_no_population_means_no_unemployment() {
        let stats = compute_labour_stats(0.0, 20.0, 0.55);
        assert_eq!(stats.workers, 0.0);
        assert_eq!(stats.unemployment_rate, 0.0);
        assert!((stats.vacancy_rate - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_balanced_market() {
        let stats = compute_labour_stats(200.0, 80.0, 0.5);
        assert_eq!(stats.workers, 100.0);
        assert_eq!(stats.employed, 80.0);
        assert_eq!(stats.unemployed, 20.0);
        assert!((stats.unemployment_rate - 0.2).abs() < 1e-6);
        assert_eq!(stats.vacancy_rate, 0.0);
    }

    #[test]
    fn test_surplus_jobs() {
        let stats = compute_labour_stats(100.0, 110.0, 0.55);
        assert_eq!(stats.unemployed, 0.0);
        assert!((stats.vacancy_rate - 0.5).abs() < 1e-6);
    }
}
