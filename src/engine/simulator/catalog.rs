use super::domain::{CollegeType, Scenario, ScenarioMetrics};

/// Template for one stream and the courses it admits to.
#[derive(Debug, Clone)]
pub struct StreamCatalog {
    pub id: &'static str,
    pub courses: Vec<&'static str>,
}

/// Injectable catalogs the projection calculator draws its re-rolls from.
/// Engine entry points take this as an argument; nothing reads a hidden
/// global, so tests can substitute fixtures freely.
#[derive(Debug, Clone)]
pub struct CatalogSet {
    pub streams: Vec<StreamCatalog>,
    pub government_colleges: Vec<&'static str>,
    pub private_colleges: Vec<&'static str>,
    pub skills: Vec<&'static str>,
    pub upskills: Vec<&'static str>,
    pub scholarships: Vec<&'static str>,
}

impl CatalogSet {
    /// The built-in catalogs shipped with the platform.
    pub fn standard() -> Self {
        Self {
            streams: vec![
                StreamCatalog {
                    id: "Science",
                    courses: vec!["B.Sc.", "B.Tech", "MBBS", "B.Pharm"],
                },
                StreamCatalog {
                    id: "Commerce",
                    courses: vec!["B.Com", "BBA", "CA Foundation"],
                },
                StreamCatalog {
                    id: "Arts",
                    courses: vec!["BA", "BFA", "BJMC"],
                },
                StreamCatalog {
                    id: "Vocational",
                    courses: vec!["Diploma (Polytechnic)", "B.Voc"],
                },
            ],
            government_colleges: vec![
                "IIT Delhi",
                "Delhi University",
                "Jamia Millia Islamia",
                "NIT Trichy",
            ],
            private_colleges: vec![
                "BITS Pilani",
                "Manipal Academy",
                "Amity University",
                "VIT Vellore",
            ],
            skills: vec![
                "coding",
                "communication",
                "data-analysis",
                "design",
                "public-speaking",
            ],
            upskills: vec![
                "machine-learning",
                "digital-marketing",
                "financial-modelling",
                "ui-ux",
            ],
            scholarships: vec![
                "NSP Merit Scholarship",
                "State Merit-cum-Means",
                "Inspire Scholarship",
            ],
        }
    }

    pub fn courses_for(&self, stream: &str) -> &[&'static str] {
        self.streams
            .iter()
            .find(|entry| entry.id == stream)
            .map(|entry| entry.courses.as_slice())
            .unwrap_or(&[])
    }

    pub fn colleges_for(&self, college_type: CollegeType) -> &[&'static str] {
        match college_type {
            CollegeType::Government => &self.government_colleges,
            CollegeType::Private => &self.private_colleges,
        }
    }
}

/// The default scenario seed the store is initialized with when a caller
/// does not bring its own. Always at least one entry.
pub fn seed_scenarios() -> Vec<Scenario> {
    let mut baseline = Scenario::named("My Plan");
    baseline.stream = "Science".to_string();
    baseline.course = "B.Tech".to_string();
    baseline.college_type = Some(CollegeType::Government);
    baseline.college = "IIT Delhi".to_string();
    baseline.skills = vec!["coding".to_string(), "communication".to_string()];
    baseline.metrics = ScenarioMetrics {
        npv: Some(1_200_000.0),
        roi: Some(1.4),
        employment_prob: Some(0.75),
        starting_salary: Some(450_000.0),
        time_to_job: Some(4),
        scholarship_odds: Some(0.5),
    };

    vec![baseline]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_covers_every_stream_with_courses() {
        let catalogs = CatalogSet::standard();
        assert!(!catalogs.streams.is_empty());
        for stream in &catalogs.streams {
            assert!(
                !catalogs.courses_for(stream.id).is_empty(),
                "stream {} has no courses",
                stream.id
            );
        }
    }

    #[test]
    fn unknown_stream_has_no_courses() {
        let catalogs = CatalogSet::standard();
        assert!(catalogs.courses_for("Astrology").is_empty());
    }

    #[test]
    fn seed_is_never_empty_and_internally_consistent() {
        let catalogs = CatalogSet::standard();
        let seed = seed_scenarios();
        assert!(!seed.is_empty());

        let baseline = &seed[0];
        assert!(catalogs
            .courses_for(&baseline.stream)
            .contains(&baseline.course.as_str()));
        let college_type = baseline.college_type.expect("seed has a college type");
        assert!(catalogs
            .colleges_for(college_type)
            .contains(&baseline.college.as_str()));
    }
}
