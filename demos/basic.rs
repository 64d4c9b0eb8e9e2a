use movie_recommender::{Corpus, Index};

fn main() {
    // build corpus and index
    let corpus = Corpus::sample();
    let index = Index::build(corpus);

    // pick a title and fetch its neighbors
    let hits = index.recommend("Inception", 5);
    println!("Because you liked 'Inception', you may also like:");
    print!("{hits}");

    // debug
    println!("vocabulary size: {}", index.vocabulary().len());
    println!("corpus size: {}", index.corpus().len());
}
