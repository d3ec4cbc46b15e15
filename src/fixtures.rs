//! Deterministic sample data for seeding and tests

use crate::{
    db::MovieStore,
    error::AppResult,
    models::{Movie, NewMovie},
};

const SAMPLE_MOVIES: [(&str, &str); 10] = [
    (
        "Звёздный Путь",
        "Экипаж исследовательского корабля отправляется к границе известной галактики.",
    ),
    (
        "Тихая Гавань",
        "Бывший моряк возвращается в родной город, чтобы раскрыть тайну исчезновения брата.",
    ),
    (
        "Последний Рубеж",
        "Небольшой гарнизон удерживает горный перевал в ожидании подкрепления.",
    ),
    (
        "Город Теней",
        "Детектив расследует серию краж, за которыми стоит тайное общество.",
    ),
    (
        "Песни Ветра",
        "Молодая певица пытается пробиться на большую сцену, не потеряв себя.",
    ),
    (
        "Невидимый Мир",
        "Группа ученых раскрывает существование параллельного мира, где законы физики искажены, и начинают исследование этой невидимой реальности.",
    ),
    (
        "Хроники Севера",
        "Семейная сага о трех поколениях рыбаков с побережья Белого моря.",
    ),
    (
        "Код Доступа",
        "Программист обнаруживает уязвимость, способную остановить работу всего города.",
    ),
    (
        "Лето Навсегда",
        "Друзья детства собираются вместе спустя двадцать лет после выпускного.",
    ),
    (
        "Железная Воля",
        "Спортсменка готовится к главному старту жизни после тяжелой травмы.",
    ),
];

/// The fixed sample catalog, in insertion order
pub fn sample_movies() -> Vec<NewMovie> {
    SAMPLE_MOVIES
        .iter()
        .map(|(title, description)| NewMovie::new(*title, *description))
        .collect()
}

/// `n` movies titled `{title_prefix}{i}` and described `{description_prefix}{i}`
pub fn numbered(title_prefix: &str, description_prefix: &str, n: usize) -> Vec<NewMovie> {
    (0..n)
        .map(|i| {
            NewMovie::new(
                format!("{}{}", title_prefix, i),
                format!("{}{}", description_prefix, i),
            )
        })
        .collect()
}

/// Inserts every movie in order and returns the stored records
pub async fn insert_all(store: &dyn MovieStore, movies: Vec<NewMovie>) -> AppResult<Vec<Movie>> {
    let mut stored = Vec::with_capacity(movies.len());
    for movie in movies {
        stored.push(store.insert(movie).await?);
    }
    Ok(stored)
}

/// Seeds the store with [`sample_movies`]
pub async fn seed(store: &dyn MovieStore) -> AppResult<Vec<Movie>> {
    let stored = insert_all(store, sample_movies()).await?;
    tracing::info!(count = stored.len(), "Seeded sample movies");
    Ok(stored)
}
