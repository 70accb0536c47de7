//! Uniform random track selection.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::CatalogEmptyError;
use crate::library::Track;

/// Pick one track uniformly at random.
///
/// Stateless: consecutive calls may return the same track.
pub fn select_track<'a, R>(catalog: &'a [Track], rng: &mut R) -> Result<&'a Track, CatalogEmptyError>
where
    R: Rng + ?Sized,
{
    catalog.choose(rng).ok_or(CatalogEmptyError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track::new(format!("/music/{i}.flac")))
            .collect()
    }

    #[test]
    fn empty_catalog_is_an_error() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(select_track(&[], &mut rng), Err(CatalogEmptyError));
    }

    #[test]
    fn selection_is_always_a_catalog_member() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 1..=8 {
            let tracks = catalog(n);
            for _ in 0..200 {
                let picked = select_track(&tracks, &mut rng).unwrap();
                assert!(tracks.contains(picked));
            }
        }
    }

    #[test]
    fn every_track_is_reachable() {
        let mut rng = StdRng::seed_from_u64(1);
        let tracks = catalog(4);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let picked = select_track(&tracks, &mut rng).unwrap();
            let idx = tracks.iter().position(|t| t == picked).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn single_track_catalog_repeats() {
        let mut rng = StdRng::seed_from_u64(3);
        let tracks = catalog(1);
        let a = select_track(&tracks, &mut rng).unwrap();
        let b = select_track(&tracks, &mut rng).unwrap();
        assert_eq!(a, b);
    }
}
