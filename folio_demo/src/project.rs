use std::sync::LazyLock;

use folio_models::project::Project;

pub static WEATHER: LazyLock<Project> = LazyLock::new(|| Project {
    id: 1,
    title: "Weather Dashboard".into(),
    description: "Live forecasts with interactive charts.".into(),
    image: "https://example.com/images/weather.png".parse().unwrap(),
    technologies: vec!["React".into(), "Chart.js".into()],
    github: "https://github.com/example/weather".parse().unwrap(),
    demo: "https://weather.example.com/".parse().unwrap(),
    featured: true,
});

pub static NOTES: LazyLock<Project> = LazyLock::new(|| Project {
    id: 2,
    title: "Markdown Notes".into(),
    description: "Offline first note taking app.".into(),
    image: "https://example.com/images/notes.png".parse().unwrap(),
    technologies: vec!["TypeScript".into(), "IndexedDB".into()],
    github: "https://github.com/example/notes".parse().unwrap(),
    demo: "https://notes.example.com/".parse().unwrap(),
    featured: false,
});

pub static ALL: LazyLock<Vec<Project>> =
    LazyLock::new(|| vec![WEATHER.clone(), NOTES.clone()]);
