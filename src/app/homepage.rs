use leptos::prelude::*;
use leptos_meta::Title;
use leptos_use::use_window_scroll;

use super::{
    contact::ContactForm,
    header::scroll_to_anchor,
    reveal::{Reveal, StatCounter},
    BrowserScheduler,
};
use crate::{
    effects::{is_compact, parallax_transform, type_out},
    reveal::GroupKind,
};

const TAGLINE: &str = "Software engineer building reliable systems and thoughtful interfaces.";

static STATS: [(&str, &str); 4] = [
    ("8+", "Years Experience"),
    ("40+", "Projects Shipped"),
    ("12+", "Certifications"),
    ("5+", "Open Source Libraries"),
];

struct Job {
    role: &'static str,
    company: &'static str,
    period: &'static str,
    points: &'static [&'static str],
    featured: bool,
}

static JOBS: [Job; 3] = [
    Job {
        role: "Senior Software Engineer",
        company: "Northwind Systems",
        period: "2022 - Present",
        points: &[
            "Led migration of the billing platform to an event-driven architecture",
            "Cut p99 API latency by 60% through query and cache redesign",
        ],
        featured: true,
    },
    Job {
        role: "Software Engineer",
        company: "Blue Harbor Labs",
        period: "2019 - 2022",
        points: &[
            "Built the customer analytics dashboard used by 200+ teams",
            "Introduced contract testing across 14 services",
        ],
        featured: false,
    },
    Job {
        role: "Junior Developer",
        company: "Bright Pixel Studio",
        period: "2017 - 2019",
        points: &["Shipped client web apps end to end, from design handoff to deploy"],
        featured: false,
    },
];

static SKILLS: [(&str, &[&str]); 4] = [
    ("Languages", &["Rust", "TypeScript", "Python", "Go", "SQL"]),
    ("Backend", &["axum", "PostgreSQL", "Redis", "Kafka"]),
    ("Frontend", &["Leptos", "React", "Tailwind CSS", "WebAssembly"]),
    ("Tooling", &["Docker", "Kubernetes", "GitHub Actions", "Terraform"]),
];

static PROJECTS: [(&str, &str); 3] = [
    (
        "Realtime Notes",
        "Collaborative note editor with CRDT sync and offline support.",
    ),
    (
        "Ledger CLI",
        "Fast double-entry accounting tool with a plain-text journal format.",
    ),
    (
        "Trail Finder",
        "Map-based hiking planner with elevation profiles and weather overlays.",
    ),
];

static ACHIEVEMENTS: [(&str, &str); 3] = [
    ("fa-trophy", "Winner, Regional Hackathon 2021"),
    ("fa-award", "Speaker, RustConf Community Track"),
    ("fa-medal", "Top 1% contributor, open source search library"),
];

static EDUCATION: [(&str, &str, &str); 2] = [
    ("M.Sc. Computer Science", "State University", "2015 - 2017"),
    ("B.Sc. Software Engineering", "City College", "2011 - 2015"),
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Home" />
        <Hero />
        <About />
        <Experience />
        <Skills />
        <Projects />
        <Achievements />
        <Education />
        <Contact />
    }
}

#[component]
fn Hero() -> impl IntoView {
    let (_, scroll_y) = use_window_scroll();
    let tagline = RwSignal::new(TAGLINE.to_string());

    Effect::new(move |_| {
        type_out(&BrowserScheduler, TAGLINE, move |frame| tagline.set(frame));
    });

    view! {
        <section id="home" class="hero" style:transform=move || parallax_transform(scroll_y.get())>
            <div class="hero-content">
                <h1>"Hi, I'm " <span class="highlight">"Alex Morgan"</span></h1>
                <p class="tagline">{tagline}</p>
                <div class="hero-buttons">
                    <a
                        href="#contact"
                        class="btn btn-primary"
                        on:click=move |ev| scroll_to_anchor(&ev, "contact")
                    >
                        "Get in Touch"
                    </a>
                    <a
                        href="#projects"
                        class="btn btn-secondary"
                        on:click=move |ev| scroll_to_anchor(&ev, "projects")
                    >
                        "View Work"
                    </a>
                </div>
            </div>
        </section>
    }
}

#[component]
fn About() -> impl IntoView {
    view! {
        <section id="about">
            <Reveal kind=GroupKind::Section class="container">
                <h2 class="section-title">"About Me"</h2>
                <p>
                    "I design and build backend services and web frontends, with a soft spot for "
                    "type-driven APIs and fast feedback loops."
                </p>
            </Reveal>
        </section>
    }
}

#[component]
fn Experience() -> impl IntoView {
    view! {
        <section id="experience">
            <Reveal kind=GroupKind::Section class="container">
                <h2 class="section-title">"Experience"</h2>
            </Reveal>
            <div class="experience-grid">
                {JOBS.iter().map(|job| view! { <ExperienceCard job=job /> }).collect_view()}
            </div>
        </section>
    }
}

#[component]
fn ExperienceCard(job: &'static Job) -> impl IntoView {
    let expanded = RwSignal::new(false);
    let toggle = move |_| {
        let width = window()
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(f64::MAX);
        if is_compact(width) {
            expanded.update(|e| *e = !*e);
        }
    };

    view! {
        <Reveal kind=GroupKind::ExperienceCard class=if job.featured { "featured" } else { "" }>
            <div class:expanded=move || expanded.get()>
                <div class="experience-header" on:click=toggle>
                    <h3>{job.role}</h3>
                    <p class="company">{job.company}</p>
                    <span class="period">{job.period}</span>
                </div>
                <ul class="experience-content">
                    {job.points.iter().map(|p| view! { <li>{*p}</li> }).collect_view()}
                </ul>
            </div>
        </Reveal>
    }
}

#[component]
fn Skills() -> impl IntoView {
    view! {
        <section id="skills">
            <Reveal kind=GroupKind::Section class="container">
                <h2 class="section-title">"Skills"</h2>
            </Reveal>
            <div class="skills-grid">
                {SKILLS
                    .iter()
                    .map(|(title, items)| {
                        view! {
                            <Reveal kind=GroupKind::SkillCategory>
                                <h3>{*title}</h3>
                                <div class="skill-tags">
                                    {items
                                        .iter()
                                        .map(|s| view! { <span class="skill-tag">{*s}</span> })
                                        .collect_view()}
                                </div>
                            </Reveal>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn Projects() -> impl IntoView {
    view! {
        <section id="projects">
            <Reveal kind=GroupKind::Section class="container">
                <h2 class="section-title">"Projects"</h2>
            </Reveal>
            <div class="projects-grid">
                {PROJECTS
                    .iter()
                    .map(|(name, blurb)| {
                        view! {
                            <Reveal kind=GroupKind::ProjectCard>
                                <h3>{*name}</h3>
                                <p>{*blurb}</p>
                            </Reveal>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn Achievements() -> impl IntoView {
    view! {
        <section id="achievements">
            <Reveal kind=GroupKind::Section class="container">
                <h2 class="section-title">"Achievements"</h2>
            </Reveal>
            <div class="achievements-grid">
                {ACHIEVEMENTS
                    .iter()
                    .map(|(icon, text)| {
                        view! {
                            <Reveal kind=GroupKind::AchievementCard>
                                <i class=format!("fas {icon}") />
                                <p>{*text}</p>
                            </Reveal>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn Education() -> impl IntoView {
    view! {
        <section id="education">
            <Reveal kind=GroupKind::Education class="container">
                <h2 class="section-title">"Education"</h2>
                <div class="timeline">
                    {EDUCATION
                        .iter()
                        .map(|(degree, school, years)| {
                            view! {
                                <Reveal kind=GroupKind::Timeline>
                                    <h3>{*degree}</h3>
                                    <p>{*school}</p>
                                    <span class="period">{*years}</span>
                                </Reveal>
                            }
                        })
                        .collect_view()}
                </div>
                <Reveal kind=GroupKind::Counters class="stats-grid">
                    {STATS
                        .iter()
                        .map(|(value, label)| {
                            view! {
                                <Reveal kind=GroupKind::StatCard>
                                    <StatCounter value=*value />
                                    <p>{*label}</p>
                                </Reveal>
                            }
                        })
                        .collect_view()}
                </Reveal>
            </Reveal>
        </section>
    }
}

#[component]
fn Contact() -> impl IntoView {
    view! {
        <section id="contact">
            <Reveal kind=GroupKind::Section class="container">
                <h2 class="section-title">"Get In Touch"</h2>
                <p>"Have a project in mind or just want to say hello? Send me a message."</p>
                <ContactForm />
            </Reveal>
        </section>
    }
}
