use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tern_ast::SyntaxKind;
use tern_parser::{ParseOptions, Parser};
use tern_scanner::Scanner;

// A mid-size module exercising declarations, generics and lookahead-heavy
// expressions.
const MODULE_SOURCE: &str = r#"
import { EventEmitter } from "events";
import type { Logger } from "./logger";

export interface Job<T = unknown> {
    readonly id: string;
    payload: T;
    attempts?: number;
    run(signal: AbortSignal): Promise<T>;
}

type Handler<T> = (job: Job<T>, done: (err?: Error) => void) => void;
type Unwrap<T> = T extends Promise<infer U> ? Unwrap<U> : T;
type Events = { [K in "start" | "stop" | "fail"]: `on${Capitalize<K>}` };

enum State { Idle, Running = 1 << 1, Stopped = 1 << 2 }

export class Queue<T> extends EventEmitter {
    #pending: Job<T>[] = [];
    private state = State.Idle;
    static readonly DEFAULT_LIMIT = 16;

    constructor(private readonly log: Logger, private limit = Queue.DEFAULT_LIMIT) {
        super();
    }

    get size(): number {
        return this.#pending.length;
    }

    push(job: Job<T>): this {
        this.#pending.push(job);
        this.emit("push", job);
        return this;
    }

    async drain(handler?: Handler<T>): Promise<void> {
        this.state = State.Running;
        for (const job of this.#pending.splice(0, this.limit)) {
            try {
                const result = await job.run(new AbortController().signal);
                handler?.(job, () => {});
                this.log.info(`job ${job.id} finished`, { result });
            } catch (err) {
                job.attempts = (job.attempts ?? 0) + 1;
                if (job.attempts! < 3) this.push(job);
                else this.emit("fail", err as Error);
            }
        }
        this.state = this.size > 0 ? State.Running : State.Stopped;
    }
}

export function byId<T extends { id: string }>(items: readonly T[]): Map<string, T> {
    return new Map(items.map((item) => [item.id, item] as const));
}

const isJob = (value: unknown): value is Job => typeof value === "object" && value !== null && "run" in value;
const compare = <T,>(a: T, b: T) => (a < b ? -1 : a > b ? 1 : 0);
export default Queue;
"#;

const JSX_SOURCE: &str = r#"
export function List({ items, onSelect }: Props) {
    return (
        <ul className="list" data-count={items.length}>
            {items.map((item) => (
                <li key={item.id} onClick={() => onSelect(item)}>
                    <span>{item.label}</span>
                    {item.badge ? <Badge {...item.badge} /> : null}
                </li>
            ))}
            <>
                <hr />
            </>
        </ul>
    );
}
"#;

const BROKEN_SOURCE: &str = r#"
function broken( {
    let x = ;
    if (x { return }
    class { ( [ <
    const y = [1, , 2;
}
"#;

fn parse(source: &str, options: ParseOptions) -> usize {
    let arena = Bump::new();
    let result = Parser::new(&arena, source, options).parse_source_file();
    result.source_file.statements.len() + result.diagnostics.len()
}

fn bench_scan(c: &mut Criterion) {
    c.bench_function("scan_module", |b| {
        b.iter(|| {
            let mut scanner = Scanner::new(black_box(MODULE_SOURCE));
            let mut count = 0usize;
            while scanner.scan() != SyntaxKind::EndOfFileToken {
                count += 1;
            }
            black_box(count)
        });
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_module", |b| {
        b.iter(|| black_box(parse(black_box(MODULE_SOURCE), ParseOptions::default())));
    });
    c.bench_function("parse_jsx", |b| {
        b.iter(|| black_box(parse(black_box(JSX_SOURCE), ParseOptions::jsx())));
    });
    c.bench_function("parse_with_recovery", |b| {
        b.iter(|| black_box(parse(black_box(BROKEN_SOURCE), ParseOptions::default())));
    });
}

fn bench_parse_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_scaling");
    for copies in [1usize, 8, 64] {
        let source = MODULE_SOURCE.repeat(copies);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(copies), &source, |b, source| {
            b.iter(|| black_box(parse(source, ParseOptions::default())));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scan, bench_parse, bench_parse_scaling);
criterion_main!(benches);
