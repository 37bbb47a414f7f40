use geo::Coord;
use rstar::RTree;

use super::{Diagram, SiteEntry, SiteId};

impl Diagram {
    fn site_index(&self) -> &RTree<SiteEntry> {
        self.index.get_or_init(|| RTree::bulk_load(
            self.sites.iter().enumerate()
                .map(|(i, site)| SiteEntry::new([site.point.x, site.point.y], i))
                .collect()
        ))
    }

    /// The site whose cell contains `point` (its nearest site under the
    /// Euclidean metric).  `None` for a diagram without sites.
    pub fn nearest_site(&self, point: Coord<f64>) -> Option<SiteId> {
        self.site_index().nearest_neighbor(&[point.x, point.y]).map(|entry| SiteId(entry.data))
    }

    /// Sites within `radius` of `point`, nearest first.
    pub fn sites_within(&self, point: Coord<f64>, radius: f64) -> Vec<SiteId> {
        let query = [point.x, point.y];
        let mut found: Vec<_> = self.site_index()
            .locate_within_distance(query, radius * radius)
            .map(|entry| {
                let [x, y] = *entry.geom();
                ((x - point.x).hypot(y - point.y), SiteId(entry.data))
            })
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        found.into_iter().map(|(_, site)| site).collect()
    }
}
