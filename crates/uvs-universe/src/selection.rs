use uvs_coarse::CoarseCandidate;
use uvs_schemas::InstrumentKey;

/// Caller-supplied selection strategy: candidate snapshot in, ranked
/// keys out. The engine treats the ranking as opaque and only applies a
/// hard cap by taking a prefix of the output.
pub trait SelectionFunction {
    fn select(&self, candidates: &[CoarseCandidate]) -> Vec<InstrumentKey>;
}

impl<F> SelectionFunction for F
where
    F: Fn(&[CoarseCandidate]) -> Vec<InstrumentKey>,
{
    fn select(&self, candidates: &[CoarseCandidate]) -> Vec<InstrumentKey> {
        self(candidates)
    }
}

/// Reference ranking: the top `count` candidates by day dollar volume,
/// descending. Ties break by key so repeated runs are deterministic.
#[derive(Debug, Clone, Copy)]
pub struct TopDollarVolume {
    pub count: usize,
}

impl TopDollarVolume {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl SelectionFunction for TopDollarVolume {
    fn select(&self, candidates: &[CoarseCandidate]) -> Vec<InstrumentKey> {
        let mut ranked: Vec<&CoarseCandidate> = candidates.iter().collect();
        ranked.sort_by(|a, b| {
            b.dollar_volume_micros
                .cmp(&a.dollar_volume_micros)
                .then_with(|| a.key.cmp(&b.key))
        });
        ranked
            .into_iter()
            .take(self.count)
            .map(|c| c.key.clone())
            .collect()
    }
}
